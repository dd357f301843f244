use crate::service::JobHandle;

/// Failures reported by graphics contexts and the services behind them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// The device refused to start a drawing span.
    ActivationFailed(String),
    /// The spooler reported a different job than the one expected.
    JobMismatch {
        expected: Option<JobHandle>,
        found: Option<JobHandle>,
    },
    /// A drawing call was made outside an active span.
    NotActive,
    /// The job behind this context was aborted.
    Aborted,
    /// Any other failure reported by an external service.
    Service(String),
}

impl std::fmt::Display for ContextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ActivationFailed(msg) => write!(f, "Context activation failed: {}", msg),
            Self::JobMismatch { expected, found } => write!(
                f,
                "Print job mismatch: expected {:?}, spooler reported {:?}",
                expected, found
            ),
            Self::NotActive => write!(f, "Graphics context is not active"),
            Self::Aborted => write!(f, "Print job was aborted"),
            Self::Service(msg) => write!(f, "Drawing service error: {}", msg),
        }
    }
}

impl std::error::Error for ContextError {}
