//! Running the interactive flow so Ctrl-C is noticed at any prompt.
//!
//! Prompts block their thread on terminal reads. The flow therefore runs on
//! the blocking pool, leaving every async worker free to drive the signal
//! driver.

use std::future::Future;
use std::io;

use crate::error::{PaykeysError, Result};

/// Run `work` on the blocking pool until it finishes or `interrupt` resolves.
///
/// An interrupt yields [`PaykeysError::Cancelled`] without waiting for `work`,
/// which may still be parked in a read. If the interrupt source itself fails
/// the run continues uninterruptible.
pub async fn until_interrupted<W, T, I>(work: W, interrupt: I) -> Result<T>
where
    W: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
    I: Future<Output = io::Result<()>>,
{
    let mut task = tokio::task::spawn_blocking(work);

    let interrupted = tokio::select! {
        joined = &mut task => return flatten(joined),
        signal = interrupt => signal,
    };

    match interrupted {
        Ok(()) => {
            tracing::debug!("interrupt received");
            Err(PaykeysError::Cancelled)
        }
        Err(e) => {
            tracing::warn!(error = %e, "cannot listen for Ctrl-C");
            flatten(task.await)
        }
    }
}

fn flatten<T>(joined: std::result::Result<Result<T>, tokio::task::JoinError>) -> Result<T> {
    joined.unwrap_or_else(|e| Err(PaykeysError::Other(e.to_string())))
}

/// Terminal mode captured at startup, put back before an abrupt exit.
///
/// A masked read turns echo off and only turns it back on when the read
/// returns. Exiting on Ctrl-C mid-read would otherwise leave the shell mute.
pub struct TerminalState {
    #[cfg(unix)]
    saved: Option<nix::sys::termios::Termios>,
}

impl TerminalState {
    /// Snapshot stdin's terminal settings. Not a terminal means nothing to keep.
    #[cfg(unix)]
    pub fn capture() -> Self {
        Self {
            saved: nix::sys::termios::tcgetattr(io::stdin()).ok(),
        }
    }

    #[cfg(not(unix))]
    pub fn capture() -> Self {
        Self {}
    }

    /// Put the captured settings back.
    #[cfg(unix)]
    pub fn restore(&self) -> Result<()> {
        use nix::sys::termios::{SetArg, tcsetattr};

        if let Some(saved) = &self.saved {
            tcsetattr(io::stdin(), SetArg::TCSANOW, saved).map_err(io::Error::from)?;
        }
        Ok(())
    }

    #[cfg(not(unix))]
    pub fn restore(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::time::{Duration, Instant};

    use tokio::sync::oneshot;

    use super::*;

    /// A future that resolves once `delay` has passed on a plain thread.
    fn interrupt_after(delay: Duration) -> impl Future<Output = io::Result<()>> {
        let (tx, rx) = oneshot::channel();
        std::thread::spawn(move || {
            std::thread::sleep(delay);
            let _ = tx.send(());
        });
        async move {
            rx.await.map_err(|_| io::Error::other("sender dropped"))
        }
    }

    // One worker, as on a single-CPU host: a read blocking that worker would
    // keep the interrupt from ever being seen.
    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn test_interrupt_while_work_is_blocked() {
        let (release, parked) = mpsc::channel::<()>();
        let started = Instant::now();

        let result = until_interrupted(
            move || {
                // stands in for a terminal read that never gets input
                let _ = parked.recv();
                Ok("finished")
            },
            interrupt_after(Duration::from_millis(100)),
        )
        .await;

        assert!(matches!(result, Err(PaykeysError::Cancelled)));
        assert!(started.elapsed() < Duration::from_secs(5));
        drop(release);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn test_work_finishes_before_interrupt() {
        let result = until_interrupted(|| Ok(7), std::future::pending()).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn test_work_error_is_returned() {
        let result: Result<()> =
            until_interrupted(|| Err(PaykeysError::Cancelled), std::future::pending()).await;
        assert!(result.unwrap_err().is_cancelled());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn test_failed_interrupt_source_waits_for_work() {
        let result = until_interrupted(
            || {
                std::thread::sleep(Duration::from_millis(50));
                Ok("done")
            },
            async { Err(io::Error::other("no signal handler")) },
        )
        .await;
        assert_eq!(result.unwrap(), "done");
    }

    #[test]
    fn test_restore_is_harmless_without_changes() {
        // putting back what was just read succeeds with or without a tty
        let state = TerminalState::capture();
        assert!(state.restore().is_ok());
        assert!(state.restore().is_ok());
    }
}
