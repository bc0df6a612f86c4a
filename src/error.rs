use thiserror::Error;

use crate::identity::ToastId;

/// Errors surfaced while registering or delivering a toast.
///
/// An unreachable target is deliberately not represented here: delivery
/// to a disconnected user is a silent no-op, not a failure.
#[derive(Debug, Error)]
pub enum Error {
    #[error("host rejected toast definition {key}: {message}")]
    Registration { key: String, message: String },
    #[error("toast definition {id} missing from host after registration")]
    DefinitionNotFound { id: ToastId },
    #[error("host subsystem error: {0}")]
    Host(String),
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
}
