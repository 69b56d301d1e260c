//! Terminal runner (default binary).
//!
//! Fixed-timestep loop: poll input until the next 16 ms tick, advance gravity,
//! turn drained game events into sound cues and score submissions, then draw.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use arrayvec::ArrayVec;
use crossterm::event::{self, Event, KeyEvent, MouseEvent};

use blockfall::audio::{LogSink, SoundBoard, SoundCue};
use blockfall::cli::{self, USAGE};
use blockfall::core::{GameConfig, GameEvent, GameSnapshot, GameState, Phase};
use blockfall::input::{
    handle_key_event, handle_menu_key, handle_mouse_event, is_press, should_quit, MenuCommand,
};
use blockfall::logging;
use blockfall::storage::{FileStore, ScoreKeeper, ScoreRecord, StorageConfig};
use blockfall::term::{FrameBuffer, GameView, LeaderboardRow, MenuView, TerminalRenderer, Viewport};
use blockfall::types::{LEADERBOARD_SIZE, TICK_MS};

const FLUSH_TIMEOUT: Duration = Duration::from_secs(2);

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts = cli::parse_args(&args)?;
    if opts.help {
        println!("{USAGE}");
        return Ok(());
    }
    logging::init(opts.log_path.as_deref())?;

    let config = opts.apply(GameConfig::from_env());
    let mut storage = StorageConfig::from_env();
    if let Some(path) = &opts.scores_path {
        storage.scores_path = path.clone();
    }
    let seed = opts.seed.unwrap_or_else(clock_seed);
    log::info!(
        "starting: mode={} level={} sound={} seed={seed} scores={}",
        config.mode.as_str(),
        config.start_level,
        config.sound_enabled,
        storage.scores_path.display()
    );

    let keeper = ScoreKeeper::new(FileStore::new(storage.scores_path))?;
    let mut app = App::new(GameState::with_config(seed, config), keeper);

    let mut term = TerminalRenderer::new();
    term.enter("blockfall")?;

    let result = run(&mut term, &mut app);

    // Always try to restore terminal state.
    let _ = term.exit();
    app.keeper.flush(FLUSH_TIMEOUT);
    result
}

fn run(term: &mut TerminalRenderer, app: &mut App) -> Result<()> {
    let mut fb = FrameBuffer::new(0, 0);
    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();
    app.keeper.refresh();

    loop {
        if let Some(board) = app.keeper.try_recv_leaderboard() {
            app.set_leaderboard(&board);
        }

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        app.render(viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if is_press(key) => {
                    if should_quit(key) {
                        log::info!("quit requested");
                        return Ok(());
                    }
                    app.handle_key(key);
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse, viewport),
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            app.game.tick(TICK_MS);
        }

        app.dispatch_events();
    }
}

struct App {
    game: GameState,
    view: GameView,
    sound: SoundBoard<LogSink>,
    keeper: ScoreKeeper<FileStore>,
    leaderboard: ArrayVec<LeaderboardRow, LEADERBOARD_SIZE>,
    snapshot: GameSnapshot,
}

impl App {
    fn new(game: GameState, keeper: ScoreKeeper<FileStore>) -> Self {
        let sound = SoundBoard::new(LogSink, game.config().sound_enabled);
        Self {
            game,
            view: GameView::default(),
            sound,
            keeper,
            leaderboard: ArrayVec::new(),
            snapshot: GameSnapshot::default(),
        }
    }

    fn render(&mut self, viewport: Viewport, fb: &mut FrameBuffer) {
        if self.game.phase() == Phase::Menu {
            let config = self.game.config();
            let menu = MenuView {
                mode: config.mode,
                start_level: config.start_level,
                sound_enabled: config.sound_enabled,
                leaderboard: self.leaderboard.clone(),
            };
            self.view.render_menu_into(&menu, viewport, fb);
        } else {
            self.game.snapshot_into(&mut self.snapshot);
            self.view.render_into(&self.snapshot, viewport, fb);
        }
    }

    fn set_leaderboard(&mut self, records: &[ScoreRecord]) {
        self.leaderboard = records
            .iter()
            .take(LEADERBOARD_SIZE)
            .map(|r| LeaderboardRow {
                score: r.score,
                lines: r.lines,
                level: r.level,
                mode: r.mode,
            })
            .collect();
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match self.game.phase() {
            Phase::Running | Phase::Paused => {
                if let Some(action) = handle_key_event(key) {
                    self.game.apply_action(action);
                } else if let Some(cmd) = handle_menu_key(key).filter(|c| c.is_global()) {
                    self.menu_command(cmd);
                }
            }
            Phase::GameOver { .. } => {
                if let Some(cmd) = handle_menu_key(key) {
                    if matches!(cmd, MenuCommand::Start) || cmd.is_global() {
                        self.menu_command(cmd);
                    }
                }
            }
            Phase::Menu => {
                if let Some(cmd) = handle_menu_key(key) {
                    self.menu_command(cmd);
                }
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, viewport: Viewport) {
        if !matches!(self.game.phase(), Phase::Running | Phase::Paused) {
            return;
        }
        let controls = self.view.touch_controls(viewport);
        if let Some(action) = handle_mouse_event(mouse, &controls) {
            self.game.apply_action(action);
        }
    }

    fn menu_command(&mut self, cmd: MenuCommand) {
        let config = self.game.config();
        match cmd {
            MenuCommand::Start => self.game.start(),
            MenuCommand::OpenMenu => {
                if self.game.open_menu() {
                    self.keeper.refresh();
                }
            }
            MenuCommand::CycleMode => self.game.set_config(config.with_mode(config.mode.cycle())),
            MenuCommand::LevelUp => self
                .game
                .set_config(config.with_start_level(config.start_level + 1)),
            MenuCommand::LevelDown => self
                .game
                .set_config(config.with_start_level(config.start_level.saturating_sub(1))),
            MenuCommand::ToggleSound => {
                let enabled = !config.sound_enabled;
                self.game.set_config(config.with_sound(enabled));
                self.sound.set_enabled(enabled);
            }
            MenuCommand::ToggleTheme => {
                self.view.toggle_theme();
                self.sound.play(SoundCue::ThemeToggle);
            }
        }
    }

    /// Route this frame's game events to audio and persistence.
    fn dispatch_events(&mut self) {
        let mut finished = None;
        for event in self.game.drain_events() {
            self.sound.handle_event(&event);
            match event {
                GameEvent::Started => log::info!("game started"),
                GameEvent::LevelChanged { level } => log::debug!("level {level}"),
                GameEvent::GameOver { won } => finished = Some(won),
                _ => {}
            }
        }

        if let Some(won) = finished {
            let record = ScoreRecord::new(
                self.game.score(),
                self.game.lines(),
                self.game.level(),
                self.game.mode(),
            );
            log::info!(
                "game over: won={won} score={} lines={} level={}",
                record.score,
                record.lines,
                record.level
            );
            self.keeper.submit(record);
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
