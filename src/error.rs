//! Error codes shared by every service error type.
//!
//! DESIGN
//! ======
//! Service modules define their own `thiserror` enums. Each one implements
//! `ErrorCode` so the HTTP layer can render a uniform
//! `{ code, message, retryable }` body without knowing the concrete type.

/// Grepable error code, retryable flag and user-facing message.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }

    /// Message safe to show to an end user. Defaults to the `Display` text.
    fn user_message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
