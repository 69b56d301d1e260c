//! Bridges the synchronous game loop with async persistence.
//!
//! The keeper owns a small tokio runtime. Saves and leaderboard loads are
//! spawned onto it and never awaited by the caller; finished leaderboards come
//! back over a channel that the loop polls once per frame. Every failure is
//! logged and dropped here, so gameplay never sees a storage error.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::records::{load_leaderboard, save_score, ScoreRecord};
use crate::store::KeyValueStore;
use crate::types::LEADERBOARD_SIZE;

pub const ENV_SCORES_PATH: &str = "BLOCKFALL_SCORES_PATH";
pub const DEFAULT_SCORES_FILE: &str = "blockfall-scores.json";

/// Where the score file lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub scores_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            scores_path: PathBuf::from(DEFAULT_SCORES_FILE),
        }
    }
}

impl StorageConfig {
    pub fn from_env() -> Self {
        let scores_path = env::var(ENV_SCORES_PATH)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SCORES_FILE));
        Self { scores_path }
    }
}

pub struct ScoreKeeper<S> {
    rt: Runtime,
    store: Arc<S>,
    board_tx: mpsc::UnboundedSender<Vec<ScoreRecord>>,
    board_rx: mpsc::UnboundedReceiver<Vec<ScoreRecord>>,
    pending: Vec<JoinHandle<()>>,
    last_key_ms: u64,
}

impl<S: KeyValueStore + 'static> ScoreKeeper<S> {
    pub fn new(store: S) -> Result<Self> {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("blockfall-storage")
            .enable_all()
            .build()
            .context("failed to create storage runtime")?;
        let (board_tx, board_rx) = mpsc::unbounded_channel();
        Ok(Self {
            rt,
            store: Arc::new(store),
            board_tx,
            board_rx,
            pending: Vec::new(),
            last_key_ms: 0,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Save a record in the background, then publish a fresh leaderboard.
    pub fn submit(&mut self, record: ScoreRecord) {
        let key_ms = self.next_key_ms();
        let store = Arc::clone(&self.store);
        let tx = self.board_tx.clone();
        self.spawn(async move {
            match save_score(&*store, &record, key_ms).await {
                Ok(()) => log::debug!("saved score {} under {key_ms}", record.score),
                Err(err) => log::warn!("failed to save score: {err:#}"),
            }
            publish_leaderboard(&*store, &tx).await;
        });
    }

    /// Load the leaderboard in the background.
    pub fn refresh(&mut self) {
        let store = Arc::clone(&self.store);
        let tx = self.board_tx.clone();
        self.spawn(async move {
            publish_leaderboard(&*store, &tx).await;
        });
    }

    /// Most recent leaderboard published since the last call, if any.
    pub fn try_recv_leaderboard(&mut self) -> Option<Vec<ScoreRecord>> {
        let mut latest = None;
        while let Ok(board) = self.board_rx.try_recv() {
            latest = Some(board);
        }
        latest
    }

    /// Block until in-flight work finishes or `timeout` passes.
    ///
    /// Called on shutdown so the last save is not lost.
    pub fn flush(&mut self, timeout: Duration) {
        let pending = std::mem::take(&mut self.pending);
        if pending.is_empty() {
            return;
        }
        let finished = self.rt.block_on(async move {
            tokio::time::timeout(timeout, async move {
                for handle in pending {
                    let _ = handle.await;
                }
            })
            .await
        });
        if finished.is_err() {
            log::warn!("storage flush timed out after {timeout:?}");
        }
    }

    fn spawn(&mut self, task: impl std::future::Future<Output = ()> + Send + 'static) {
        self.pending.retain(|handle| !handle.is_finished());
        self.pending.push(self.rt.spawn(task));
    }

    /// Millisecond timestamp, bumped so keys from one keeper never collide.
    fn next_key_ms(&mut self) -> u64 {
        let key = current_timestamp_ms().max(self.last_key_ms + 1);
        self.last_key_ms = key;
        key
    }
}

async fn publish_leaderboard<S: KeyValueStore>(
    store: &S,
    tx: &mpsc::UnboundedSender<Vec<ScoreRecord>>,
) {
    match load_leaderboard(store, LEADERBOARD_SIZE).await {
        Ok(board) => {
            let _ = tx.send(board);
        }
        Err(err) => log::warn!("failed to load leaderboard: {err:#}"),
    }
}

fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
