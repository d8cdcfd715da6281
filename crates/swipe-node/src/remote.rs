use crate::sync::SyncClient;
use std::sync::{Arc, Mutex};
use swipe_core::score::HighScoreSync;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// Outcome of the most recent pushes, for display only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncStatus {
    pub pushed: u32,
    pub failed: u32,
    pub last_synced: Option<u32>,
    pub last_error: Option<String>,
}

enum PushCommand {
    Push(u32),
    Flush(oneshot::Sender<()>),
}

/// Pushes high-score raises to the backend from one worker task.
///
/// `high_score_raised` only enqueues and returns at once. The worker sends
/// one PATCH at a time, coalescing a backlog to its highest score and
/// skipping anything at or below the last confirmed push, so the backend
/// never ends on a lower score than one it already accepted. Failures land
/// in [`SyncStatus`] and the log; the local record is never touched from
/// here. The worker stops once every clone is dropped.
#[derive(Clone)]
pub struct RemoteHighScoreSync {
    queue: mpsc::UnboundedSender<PushCommand>,
    status: Arc<Mutex<SyncStatus>>,
}

impl RemoteHighScoreSync {
    pub fn new(client: SyncClient, username: impl Into<String>, runtime: Handle) -> Self {
        let (queue, rx) = mpsc::unbounded_channel();
        let status = Arc::new(Mutex::new(SyncStatus::default()));

        runtime.spawn(push_worker(client, username.into(), rx, status.clone()));
        Self { queue, status }
    }

    pub fn status(&self) -> SyncStatus {
        self.status
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    /// Waits until every raise enqueued so far has been pushed or has failed.
    pub async fn flush(&self) {
        let (reply, done) = oneshot::channel();
        if self.queue.send(PushCommand::Flush(reply)).is_err() {
            return;
        }
        let _ = done.await;
    }
}

impl HighScoreSync for RemoteHighScoreSync {
    fn high_score_raised(&self, score: u32) {
        if self.queue.send(PushCommand::Push(score)).is_err() {
            warn!("Sync worker is gone, dropping high score {}", score);
        }
    }
}

async fn push_worker(
    client: SyncClient,
    username: String,
    mut rx: mpsc::UnboundedReceiver<PushCommand>,
    status: Arc<Mutex<SyncStatus>>,
) {
    let mut confirmed: Option<u32> = None;

    while let Some(cmd) = rx.recv().await {
        let mut target = None;
        let mut waiters = Vec::new();
        match cmd {
            PushCommand::Push(score) => target = Some(score),
            PushCommand::Flush(reply) => waiters.push(reply),
        }

        // Whatever queued up meanwhile collapses into one push.
        while let Ok(next) = rx.try_recv() {
            match next {
                PushCommand::Push(score) => target = Some(target.map_or(score, |t| t.max(score))),
                PushCommand::Flush(reply) => waiters.push(reply),
            }
        }

        if let Some(score) = target {
            if confirmed.is_some_and(|c| score <= c) {
                debug!("Skipping stale high score push {}", score);
            } else {
                let result = client.update_high_score(&username, score).await;
                if result.is_ok() {
                    confirmed = Some(score);
                }
                record(&status, &username, score, result);
            }
        }

        for reply in waiters {
            let _ = reply.send(());
        }
    }
}

fn record(
    status: &Mutex<SyncStatus>,
    username: &str,
    score: u32,
    result: crate::error::SyncResult<()>,
) {
    let Ok(mut s) = status.lock() else {
        return;
    };
    match result {
        Ok(()) => {
            info!("☁️  High score {} synced for '{}'", score, username);
            s.pushed += 1;
            s.last_synced = Some(score);
        }
        Err(e) => {
            warn!("❌ High score sync failed: {}", e);
            s.failed += 1;
            s.last_error = Some(e.to_string());
        }
    }
}
