//! Short, actionable messages for per-source I/O failures

use std::io;
use std::path::Path;

/// Check if an IO error is a permission denied error
pub fn is_permission_denied(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::PermissionDenied
}

/// Check if an IO error is a "not found" error
pub fn is_not_found(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::NotFound
}

/// Check if an IO error came from treating a directory as a file
pub fn is_directory(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::IsADirectory
}

/// Message for a source that couldn't be opened or read
pub fn source_error_message(path: &Path, err: &io::Error) -> String {
    if is_not_found(err) {
        format!("can't read {}: No such file or directory", path.display())
    } else if is_permission_denied(err) {
        format!("can't read {}: Permission denied", path.display())
    } else if is_directory(err) || path.is_dir() {
        format!("couldn't edit {}: not a regular file", path.display())
    } else {
        format!("read error on {}: {}", path.display(), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;

    #[test]
    fn test_is_permission_denied() {
        let perm_err = io::Error::new(ErrorKind::PermissionDenied, "access denied");
        assert!(is_permission_denied(&perm_err));

        let not_found_err = io::Error::new(ErrorKind::NotFound, "not found");
        assert!(!is_permission_denied(&not_found_err));
    }

    #[test]
    fn test_is_not_found() {
        let not_found_err = io::Error::new(ErrorKind::NotFound, "not found");
        assert!(is_not_found(&not_found_err));

        let perm_err = io::Error::new(ErrorKind::PermissionDenied, "access denied");
        assert!(!is_not_found(&perm_err));
    }

    #[test]
    fn test_not_found_message() {
        let err = io::Error::new(ErrorKind::NotFound, "not found");
        let msg = source_error_message(Path::new("/tmp/missing.txt"), &err);
        assert_eq!(msg, "can't read /tmp/missing.txt: No such file or directory");
    }

    #[test]
    fn test_permission_message() {
        let err = io::Error::new(ErrorKind::PermissionDenied, "access denied");
        let msg = source_error_message(Path::new("secret.txt"), &err);
        assert!(msg.contains("Permission denied"));
        assert!(msg.contains("secret.txt"));
    }

    #[test]
    fn test_other_message_keeps_cause() {
        let err = io::Error::new(ErrorKind::InvalidData, "stream did not contain valid UTF-8");
        let msg = source_error_message(Path::new("bin.dat"), &err);
        assert!(msg.starts_with("read error on bin.dat: "));
        assert!(msg.contains("valid UTF-8"));
    }
}
