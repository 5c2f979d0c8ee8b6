pub mod credential;
pub mod session;

pub use credential::Credential;
pub use session::{is_artifact_name, SessionId};
