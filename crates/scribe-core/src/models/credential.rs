use std::fmt;

use crate::error::AppError;

/// Provider credential supplied by the caller for a single request.
///
/// The value is forwarded verbatim as the `authorization` header of every provider
/// call. It is never persisted and `Debug` output is redacted so it cannot leak into
/// logs through `?credential` fields.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Accepts any value that is not blank and keeps it as given.
    pub fn new(value: impl AsRef<str>) -> Result<Self, AppError> {
        let value = value.as_ref();
        if value.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "AssemblyAI API key is required".to_string(),
            ));
        }
        Ok(Self(value.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(**redacted**)")
    }
}
