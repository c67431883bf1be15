use super::{convert, ui};
use crate::core::session::Session;
use crate::core::ticker::RateTicker;
use anyhow::Result;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

fn redraw(session: &Mutex<Session>) -> Result<()> {
    let session = session
        .lock()
        .map_err(|_| anyhow::anyhow!("Session lock poisoned"))?;
    ui::print_separator();
    println!("{}", convert::render(&session));
    Ok(())
}

/// Shows the calculator and redraws it after every rate refresh, until
/// `max_ticks` refreshes have happened or Ctrl-C is pressed.
pub async fn run(session: Session, period: Duration, max_ticks: Option<u64>) -> Result<()> {
    let session = Arc::new(Mutex::new(session));
    redraw(&session)?;

    let ticker = RateTicker::spawn(Arc::clone(&session), period);
    let mut ticks = ticker.subscribe();

    let result = loop {
        tokio::select! {
            changed = ticks.changed() => {
                if changed.is_err() {
                    break Ok(());
                }
                let count = *ticks.borrow_and_update();
                if let Err(e) = redraw(&session) {
                    break Err(e);
                }
                if max_ticks.is_some_and(|max| count >= max) {
                    debug!("Reached {} refreshes", count);
                    break Ok(());
                }
            }
            _ = tokio::signal::ctrl_c() => {
                debug!("Interrupted");
                break Ok(());
            }
        }
    };

    ticker.stop().await;
    result
}
