//! Errors raised by the form and query rules, before anything is sent
//! upstream.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// Missing or malformed input. The message is already localized and is
    /// shown to the user as-is.
    #[error("{0}")]
    Validation(String),

    /// A field name the patient forms do not have.
    #[error("Unknown patient field '{0}'")]
    UnknownField(String),
}
