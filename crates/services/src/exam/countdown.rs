use std::time::Duration;

use tokio::time::{Instant, interval_at};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TickOutcome {
    Running,
    Finished,
}

/// Spawn the repeating countdown task.
///
/// The first tick fires one `period` after spawning. The task ends when
/// `token` is cancelled or `on_tick` reports `Finished`.
pub(super) fn spawn_countdown<F>(period: Duration, token: CancellationToken, mut on_tick: F)
where
    F: FnMut() -> TickOutcome + Send + 'static,
{
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        loop {
            tokio::select! {
                biased;
                () = token.cancelled() => break,
                _ = ticker.tick() => {
                    if on_tick() == TickOutcome::Finished {
                        break;
                    }
                }
            }
        }
    });
}
