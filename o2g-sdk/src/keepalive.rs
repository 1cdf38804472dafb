//! Session keep-alive scheduling.
//!
//! A background task sleeps for the session time-to-live, sends one
//! keep-alive and sleeps again. Each keep-alive runs in its own task and is
//! never awaited by the schedule, so stopping the schedule does not cancel a
//! call already sent.

use std::sync::Arc;
use std::time::Duration;

use o2g_api::SessionsRest;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

/// Recurring keep-alive of one session
pub(crate) struct KeepAlive {
    background_task: Option<JoinHandle<()>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl KeepAlive {
    /// Start the schedule; the first keep-alive is sent after `period`.
    pub(crate) fn start(sessions: Arc<SessionsRest>, period: Duration) -> Self {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let background_task = tokio::spawn(Self::keep_alive_task(sessions, period, shutdown_rx));

        Self {
            background_task: Some(background_task),
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Stop future firings. Calling it again does nothing.
    pub(crate) fn stop(&mut self) {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            let _ = shutdown_tx.send(());
        }
        if let Some(task) = self.background_task.take() {
            task.abort();
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        self.background_task
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    async fn keep_alive_task(
        sessions: Arc<SessionsRest>,
        period: Duration,
        mut shutdown_rx: oneshot::Receiver<()>,
    ) {
        loop {
            tokio::select! {
                biased;

                _ = &mut shutdown_rx => break,
                _ = tokio::time::sleep(period) => {
                    debug!("Send keep alive");
                    let sessions = sessions.clone();
                    tokio::spawn(async move {
                        match sessions.keep_alive().await {
                            Ok(true) => trace!("Keep alive accepted"),
                            Ok(false) => warn!("Keep alive refused by the gateway"),
                            Err(e) => warn!("Keep alive failed: {}", e),
                        }
                    });
                }
            }
        }
    }
}

impl Drop for KeepAlive {
    fn drop(&mut self) {
        self.stop();
    }
}
