use thiserror::Error;

/// Client-side validation failures, raised before any request leaves the process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required form fields are empty.
    #[error("Please fill in all fields.")]
    MissingFields(Vec<&'static str>),

    /// The password does not reach the required strength score.
    #[error("Password must be at least 8 characters long and include uppercase, numbers, and special characters")]
    WeakPassword { score: u8 },

    /// Password and confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,
}
