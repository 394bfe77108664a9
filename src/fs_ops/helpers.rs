//! I/O error hints.
//! Maps common failure codes to a short piece of actionable advice that is
//! attached to per-file failure reports as a structured field.

use std::io;

#[cfg(unix)]
pub(super) fn io_hint(e: &io::Error) -> Option<&'static str> {
    if let Some(code) = e.raw_os_error() {
        return match code {
            libc::EACCES | libc::EPERM => Some("check ownership and write permissions"),
            libc::ENOENT => Some("path vanished mid-run; verify it exists"),
            libc::EEXIST => Some("name already taken on disk"),
            libc::ENOSPC => Some("insufficient space on device"),
            libc::EROFS => Some("read-only filesystem; cannot write here"),
            libc::ENAMETOOLONG => Some("filename or path too long; shorten path segments"),
            libc::ELOOP => Some("too many symbolic link levels; possible symlink cycle"),
            _ => None,
        };
    }
    kind_hint(e)
}

#[cfg(not(unix))]
pub(super) fn io_hint(e: &io::Error) -> Option<&'static str> {
    kind_hint(e)
}

fn kind_hint(e: &io::Error) -> Option<&'static str> {
    match e.kind() {
        io::ErrorKind::PermissionDenied => Some("check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("path vanished mid-run; verify it exists"),
        io::ErrorKind::AlreadyExists => Some("name already taken on disk"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_denied_has_a_hint() {
        let e = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        assert!(io_hint(&e).unwrap().contains("permissions"));
    }

    #[test]
    fn unclassified_errors_have_none() {
        let e = io::Error::other("weird");
        assert!(io_hint(&e).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn raw_enospc_maps_to_space_hint() {
        let e = io::Error::from_raw_os_error(libc::ENOSPC);
        assert!(io_hint(&e).unwrap().contains("space"));
    }
}
