use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{ARTIFACT_EXTENSION, ARTIFACT_PREFIX, SESSION_PREFIX};

/// Identifier scoping one upload batch: its input directory and its combined artifact.
///
/// Format: `session_<unix-seconds>_<8 hex chars>`. The random suffix keeps concurrent
/// uploads within the same second apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        Self(format!(
            "{}{}_{}",
            SESSION_PREFIX,
            Utc::now().timestamp(),
            &suffix[..8]
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the combined transcript file for this session.
    pub fn artifact_name(&self) -> String {
        format!("{}{}{}", ARTIFACT_PREFIX, self.0, ARTIFACT_EXTENSION)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether `name` looks like a combined transcript artifact (`transcript_session_*.txt`).
///
/// Callers must reduce the name to its base name first; this only checks the pattern.
pub fn is_artifact_name(name: &str) -> bool {
    let prefix = format!("{}{}", ARTIFACT_PREFIX, SESSION_PREFIX);
    name.starts_with(&prefix)
        && name.ends_with(ARTIFACT_EXTENSION)
        && name.len() > prefix.len() + ARTIFACT_EXTENSION.len()
        && !name.contains('/')
        && !name.contains('\\')
}
