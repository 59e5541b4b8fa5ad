use tokio::sync::watch;

/// Broadcasts a one-way shutdown request to the follow loop.
#[derive(Clone, Debug)]
pub struct ShutdownHandle {
    tx: watch::Sender<bool>,
}

impl Default for ShutdownHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownHandle {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn trigger(&self) {
        if !self.tx.send_replace(true) {
            tracing::info!("shutdown signaled");
        }
    }

    /// Registers for SIGINT (and SIGTERM on Unix) and returns a future that
    /// triggers shutdown once either arrives.
    ///
    /// On Unix the listeners exist once this returns, so a signal delivered
    /// before the future is first polled is still seen. Must be called from
    /// within a Tokio runtime.
    pub fn signal_listener(&self) -> anyhow::Result<impl Future<Output = ()> + Send + 'static> {
        let handle = self.clone();

        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};

            let mut int = signal(SignalKind::interrupt())?;
            let mut term = signal(SignalKind::terminate())?;
            Ok(async move {
                tokio::select! {
                    _ = int.recv() => tracing::info!("SIGINT received"),
                    _ = term.recv() => tracing::info!("SIGTERM received"),
                }
                handle.trigger();
            })
        }

        #[cfg(not(unix))]
        {
            Ok(async move {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        tracing::info!("Ctrl-C received");
                        handle.trigger();
                    }
                    Err(e) => tracing::warn!(error = %e, "signal handler unavailable"),
                }
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn trigger_reaches_subscribers() {
        let handle = ShutdownHandle::new();
        let mut rx = handle.subscribe();
        assert!(!*rx.borrow());

        handle.trigger();

        rx.changed().await.unwrap();
        assert!(*rx.borrow());
        assert!(handle.is_triggered());
    }

    #[test]
    fn trigger_without_subscribers_is_remembered() {
        let handle = ShutdownHandle::new();
        handle.trigger();
        handle.trigger();

        assert!(*handle.subscribe().borrow());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn signal_before_first_poll_is_not_lost() {
        let handle = ShutdownHandle::new();
        let listener = handle.signal_listener().unwrap();

        let status = std::process::Command::new("kill")
            .args(["-TERM", &std::process::id().to_string()])
            .status()
            .unwrap();
        assert!(status.success());

        tokio::time::timeout(std::time::Duration::from_secs(5), listener)
            .await
            .expect("listener should see the signal");
        assert!(handle.is_triggered());
    }
}
