use futures_util::future::{select, Either};

use super::{PollSettings, PrintBackend, RunError, Timer};

/// Waits until the spooler reports an empty queue.
///
/// Two futures race: the poll loop (sleep one interval, ask whether the
/// printer is busy, repeat) and a deadline of `settings.timeout`. If the
/// deadline wins, the poll loop is dropped, every queued job is cancelled
/// and the wait fails with [`RunError::TimedOut`].
pub async fn wait_until_idle<B, T>(
    backend: &B,
    timer: &T,
    settings: &PollSettings,
) -> Result<(), RunError>
where
    B: PrintBackend,
    T: Timer,
{
    let poll = Box::pin(async {
        loop {
            timer.sleep(settings.interval).await;
            if !backend.is_printing().await? {
                return Ok::<(), RunError>(());
            }
        }
    });
    let deadline = Box::pin(timer.sleep(settings.timeout));

    match select(poll, deadline).await {
        Either::Left((result, _deadline)) => result,
        Either::Right(((), poll)) => {
            drop(poll);
            // The run fails either way; a failed flush must not hide the timeout.
            let _ = backend.cancel_all().await;
            Err(RunError::TimedOut)
        }
    }
}
