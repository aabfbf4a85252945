/// UI notification boundary. Fire-and-forget: implementations must not block.
pub trait Notifier: Send + Sync {
    fn report_failure(&self, message: &str);
}

/// Notifier that only writes to the log, for headless embedders.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn report_failure(&self, message: &str) {
        tracing::warn!(target: "fin4::notify", "{}", message);
    }
}
