//! Error types for the virtual keyboard.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for vkbd operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while bringing up or driving a virtual keyboard.
#[derive(Debug, Error)]
pub enum Error {
    /// None of the candidate device nodes exist.
    #[error(
        "uinput was not found (tried {}). Is the uinput module loaded?",
        join_paths(.candidates)
    )]
    NotFound { candidates: Vec<PathBuf> },

    /// A device node exists but the process may not open it for writing.
    #[error("permission denied opening {}. Check you have write access to uinput", .path.display())]
    PermissionDenied { path: PathBuf },

    /// Any other failure opening a device node.
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The device descriptor or a capability declaration was rejected.
    #[error("failed to set up uinput: {0}")]
    Setup(String),

    /// The kernel refused to instantiate the device.
    #[error("failed to create uinput device: {0}")]
    Creation(#[source] io::Error),

    /// An event write was short or failed. `source` carries the OS error
    /// when the write itself failed.
    #[error("failed to send event: {detail}")]
    Emission {
        detail: String,
        #[source]
        source: Option<io::Error>,
    },
}

impl Error {
    /// Whether this error means access to the device node was refused.
    ///
    /// Callers can use this to suggest joining the `input` group or
    /// installing a udev rule instead of reporting a generic failure.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Error::PermissionDenied { .. })
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_lists_candidates() {
        let err = Error::NotFound {
            candidates: vec!["/dev/uinput".into(), "/dev/input/uinput".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("/dev/uinput, /dev/input/uinput"));
        assert!(msg.contains("module loaded"));
    }

    #[test]
    fn test_is_permission_denied() {
        let denied = Error::PermissionDenied {
            path: "/dev/uinput".into(),
        };
        assert!(denied.is_permission_denied());
        assert!(!Error::Setup("x".into()).is_permission_denied());
    }

    #[test]
    fn test_emission_keeps_os_error() {
        use std::error::Error as _;

        let err = Error::Emission {
            detail: "key write".into(),
            source: Some(io::Error::from_raw_os_error(libc::EIO)),
        };
        let source = err.source().unwrap().downcast_ref::<io::Error>().unwrap();
        assert_eq!(source.raw_os_error(), Some(libc::EIO));
        assert!(err.to_string().contains("key write"));
    }
}
