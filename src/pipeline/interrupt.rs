use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tokio::task::JoinHandle;

use crate::{Res, warning};

/// Cooperative stop signal shared by every enrichment worker.
///
/// Set at most once per run and never reset; setting it again is a no-op.
#[derive(Debug, Clone, Default)]
pub struct InterruptFlag(Arc<AtomicBool>);

impl InterruptFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the flag. Returns `true` only for the call that raised it.
    pub fn set(&self) -> bool {
        !self.0.swap(true, Ordering::SeqCst)
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Routes Ctrl-C and SIGTERM to `flag` instead of terminating the process,
/// so whatever was matched so far still gets written.
///
/// The returned task runs until aborted.
pub fn install_signal_handlers(flag: InterruptFlag) -> Res<JoinHandle<()>> {
    #[cfg(unix)]
    let mut terminate =
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;

    Ok(tokio::spawn(async move {
        loop {
            #[cfg(unix)]
            let received = tokio::select! {
                res = tokio::signal::ctrl_c() => res.is_ok(),
                res = terminate.recv() => res.is_some(),
            };
            #[cfg(not(unix))]
            let received = tokio::signal::ctrl_c().await.is_ok();

            if !received {
                break;
            }
            if flag.set() {
                warning!("Interrupted. Finishing running searches, remaining songs stay unmatched.");
            }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_is_set_once() {
        let flag = InterruptFlag::new();
        assert!(!flag.is_set());

        assert!(flag.set());
        assert!(!flag.set());
        assert!(flag.is_set());
    }

    #[test]
    fn test_clones_share_state() {
        let flag = InterruptFlag::new();
        let worker_view = flag.clone();
        flag.set();
        assert!(worker_view.is_set());
    }

    #[cfg(unix)]
    fn send_sigterm_to_self() {
        let status = std::process::Command::new("kill")
            .args(["-TERM", &std::process::id().to_string()])
            .status()
            .unwrap();
        assert!(status.success());
    }

    #[cfg(unix)]
    async fn wait_until_set(flag: &InterruptFlag) {
        for _ in 0..100 {
            if flag.is_set() {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_sigterm_raises_flag_and_repeats_are_harmless() {
        let flag = InterruptFlag::new();
        let handler = install_signal_handlers(flag.clone()).unwrap();

        send_sigterm_to_self();
        wait_until_set(&flag).await;
        assert!(flag.is_set());

        send_sigterm_to_self();
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;

        // Still listening, and the raise already happened exactly once.
        assert!(!handler.is_finished());
        assert!(!flag.set());
        assert!(flag.is_set());

        handler.abort();
    }
}
