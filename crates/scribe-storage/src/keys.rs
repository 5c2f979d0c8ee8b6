//! Name sanitisation for files written under the storage roots.

use crate::traits::{StorageError, StorageResult};

/// Reduce a client-supplied path to its final component.
///
/// Both `/` and `\` are treated as separators so names produced by Windows browsers are
/// handled the same way. Returns an empty string when nothing usable remains.
pub fn base_name(name: &str) -> &str {
    let last = name
        .rsplit(|c: char| c == '/' || c == '\\')
        .find(|segment| !segment.is_empty())
        .unwrap_or("");
    match last {
        "." | ".." => "",
        other => other,
    }
}

/// Name under which the `index`-th upload of a session is stored.
pub(crate) fn input_file_name(index: usize, original: &str) -> StorageResult<String> {
    let name = base_name(original);
    if name.is_empty() {
        return Err(StorageError::InvalidKey(format!(
            "Invalid upload filename: {:?}",
            original
        )));
    }
    Ok(format!("{:03}_{}", index + 1, name))
}

/// Validate an artifact name before it is joined onto the output directory.
pub(crate) fn artifact_file_name(name: &str) -> StorageResult<&str> {
    let base = base_name(name);
    if base.is_empty() || base != name {
        return Err(StorageError::InvalidKey(format!(
            "Invalid artifact name: {:?}",
            name
        )));
    }
    Ok(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_name_strips_directories() {
        assert_eq!(base_name("a.mp3"), "a.mp3");
        assert_eq!(base_name("/tmp/uploads/a.mp3"), "a.mp3");
        assert_eq!(base_name("C:\\Users\\me\\b.wav"), "b.wav");
        assert_eq!(base_name("../../etc/passwd"), "passwd");
        assert_eq!(base_name("dir/"), "dir");
    }

    #[test]
    fn test_base_name_rejects_dot_segments() {
        assert_eq!(base_name(".."), "");
        assert_eq!(base_name("../.."), "");
        assert_eq!(base_name(""), "");
    }

    #[test]
    fn test_input_file_name_is_index_prefixed() {
        assert_eq!(input_file_name(0, "a.mp3").unwrap(), "001_a.mp3");
        assert_eq!(input_file_name(11, "x/y/b.mp3").unwrap(), "012_b.mp3");
        assert!(input_file_name(0, "..").is_err());
    }

    #[test]
    fn test_artifact_file_name_rejects_paths() {
        assert!(artifact_file_name("transcript_session_1.txt").is_ok());
        assert!(artifact_file_name("../transcript_session_1.txt").is_err());
        assert!(artifact_file_name("").is_err());
    }
}
