/// Failures that end a request without producing a response.
///
/// A `LastTurnWasIntent` without a name is not an error; the handler asks the
/// user again instead.
#[derive(Debug, thiserror::Error)]
pub enum SkillError {
    #[error("Invalid intent: {0}")]
    UnknownIntent(String),
    #[error("Invalid application id: expected {expected}, got {actual}")]
    InvalidApplicationId { expected: String, actual: String },
    #[error("Turn store failure: {0:#}")]
    Store(anyhow::Error),
}
