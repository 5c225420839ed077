use pwned_range::{BreachQueryResult, Error, FailureKind};
use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;

/// A lookup that could not be completed. Distinct from a clean result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreachCheckFailed {
    pub kind: FailureKind,
    pub reason: String,
}

impl From<&Error> for BreachCheckFailed {
    fn from(error: &Error) -> Self {
        Self { kind: error.kind(), reason: error.to_string() }
    }
}

/// Everything a pipeline reports to its listener.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BreachEvent {
    /// Input was cleared; any pending check was dropped.
    WaitingForInput,
    /// The lookup for the current input completed.
    Checked(BreachQueryResult),
    /// The lookup for the current input failed.
    Failed(BreachCheckFailed),
}

/// Receives pipeline events.
///
/// Called after the pipeline has settled into its new state and released its lock,
/// so an implementation may query or drive the same pipeline from inside
/// `on_event`. A channel sender is a listener too.
pub trait BreachListener: Send + Sync {
    fn on_event(&self, event: BreachEvent);
}

impl<F> BreachListener for F
where
    F: Fn(BreachEvent) + Send + Sync,
{
    fn on_event(&self, event: BreachEvent) {
        self(event)
    }
}

impl BreachListener for UnboundedSender<BreachEvent> {
    fn on_event(&self, event: BreachEvent) {
        // A closed receiver means nobody is watching any more.
        let _ = self.send(event);
    }
}
