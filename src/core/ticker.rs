//! Background task that refreshes the session's rates on a fixed interval.

use crate::core::session::Session;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, warn};

pub struct RateTicker {
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
    ticks: watch::Receiver<u64>,
}

// Returns false once the session can no longer be used.
fn refresh(session: &Mutex<Session>) -> bool {
    match session.lock() {
        Ok(mut session) => {
            session.refresh_rates(&mut rand::thread_rng());
            true
        }
        Err(_) => {
            warn!("Session lock poisoned, stopping rate refresh");
            false
        }
    }
}

impl RateTicker {
    /// Starts refreshing every `period`. The first refresh happens one
    /// period from now.
    pub fn spawn(session: Arc<Mutex<Session>>, period: Duration) -> Self {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        let (ticks_tx, ticks_rx) = watch::channel(0u64);

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        debug!("Rate ticker stopping");
                        break;
                    }
                    _ = interval.tick() => {
                        if !refresh(&session) {
                            break;
                        }
                        ticks_tx.send_modify(|n| *n += 1);
                    }
                }
            }
        });
        debug!("Rate ticker started, period {:?}", period);

        Self {
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
            ticks: ticks_rx,
        }
    }

    /// Receives the number of refreshes done so far, updated after each one.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.ticks.clone()
    }

    /// Stops the timer and waits for the task to finish.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!("Rate ticker ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for RateTicker {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
