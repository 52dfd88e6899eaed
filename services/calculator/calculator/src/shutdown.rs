use tokio::sync::watch;

#[derive(Clone)]
pub(crate) struct Receiver(watch::Receiver<bool>);

pub(crate) struct Sender(watch::Sender<bool>);

pub(crate) fn channel() -> (Sender, Receiver) {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    (Sender(shutdown_tx), Receiver(shutdown_rx))
}

impl Receiver {
    pub fn terminating(&self) -> bool {
        *self.0.borrow()
    }

    /// Resolves once shutdown is requested or the sender is dropped
    pub async fn recv(&mut self) {
        while !self.terminating() {
            if self.0.changed().await.is_err() {
                return;
            }
        }
    }
}

impl Sender {
    pub fn shutdown(&self) {
        let _ = self.0.send(true);
    }
}
