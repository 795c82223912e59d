//! Overall resolution deadline.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error_handling::ResolveError;

/// Runs `work` against an independent timer.
///
/// With `deadline == None` the work simply runs to completion. Otherwise
/// whichever finishes first decides the outcome: when the timer wins, `cancel`
/// is cancelled, the in-flight work is dropped (closing any open connection)
/// and `ResolveError::Timeout` is returned, naming the hop recorded in
/// `in_flight` at that moment. No partial result survives a timeout.
pub async fn run_with_deadline<T, F>(
    deadline: Option<Duration>,
    cancel: &CancellationToken,
    in_flight: &AtomicUsize,
    work: F,
) -> Result<T, ResolveError>
where
    F: Future<Output = Result<T, ResolveError>>,
{
    let Some(limit) = deadline else {
        return work.await;
    };

    tokio::select! {
        result = work => result,
        _ = tokio::time::sleep(limit) => {
            log::debug!("deadline of {:.2}s reached, abandoning resolution", limit.as_secs_f64());
            cancel.cancel();
            // Hop 0 means the first request was not issued yet
            let hop = in_flight.load(Ordering::Relaxed).max(1);
            Err(ResolveError::Timeout { hop, limit })
        }
    }
}
