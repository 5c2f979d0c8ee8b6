//! Constants shared across crates.

/// Prefix of every generated session identifier.
pub const SESSION_PREFIX: &str = "session_";

/// Prefix of every combined transcript artifact name.
pub const ARTIFACT_PREFIX: &str = "transcript_";

/// Extension of every combined transcript artifact name.
pub const ARTIFACT_EXTENSION: &str = ".txt";

/// Multipart field carrying the provider credential.
pub const CREDENTIAL_FIELD: &str = "apiKey";

/// Multipart field carrying the audio files.
pub const FILES_FIELD: &str = "files";

/// Route prefix under which artifacts are served.
pub const DOWNLOAD_ROUTE_PREFIX: &str = "/download/";
