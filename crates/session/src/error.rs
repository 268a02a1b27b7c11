use outreach_client::ApiError;
use outreach_core::error::CoreError;
use outreach_core::types::ProfessorId;

/// Failures surfaced to the front-end, one per user-facing operation.
///
/// Every variant is terminal for that operation only; the session state
/// keeps its previous valid contents.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The directory fetch failed; the previous list is still shown.
    #[error("Failed to load directory: {0}")]
    LoadFailed(#[source] ApiError),

    /// The selected professor's detail could not be loaded.
    #[error("Failed to load professor {id}: {source}")]
    DetailFailed {
        id: ProfessorId,
        #[source]
        source: ApiError,
    },

    /// The backend rejected the submitted address as malformed.
    #[error("Invalid email address: {0}")]
    InvalidEmail(#[source] ApiError),

    /// Any other email save failure.
    #[error("Failed to save email: {0}")]
    SubmitFailed(#[source] ApiError),

    /// A submission is already in flight.
    #[error("An email update is already in progress")]
    SubmitInFlight,

    #[error("Health check failed: {0}")]
    HealthCheckFailed(#[source] ApiError),

    #[error(transparent)]
    Core(#[from] CoreError),
}
