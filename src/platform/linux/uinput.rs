//! uinput access through the real device node.

use crate::abi::{ui_dev_create, ui_dev_destroy, ui_set_evbit, ui_set_keybit};
use crate::backend::{Backend, Request};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::io::AsRawFd;
use std::path::Path;

/// [`Backend`] backed by `open(2)`, `write(2)` and `ioctl(2)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBackend;

impl SystemBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Backend for SystemBackend {
    type Handle = File;

    fn open(&mut self, path: &Path) -> io::Result<File> {
        OpenOptions::new().write(true).open(path)
    }

    fn write(&mut self, handle: &File, bytes: &[u8]) -> io::Result<usize> {
        let mut file = handle;
        file.write(bytes)
    }

    fn control(&mut self, handle: &File, request: Request) -> io::Result<()> {
        let fd = handle.as_raw_fd();
        // SAFETY: fd is open for the lifetime of `handle`, and each request
        // takes either no argument or an int, as passed here.
        let ret = unsafe {
            match request {
                Request::SetEventBit(bit) => ui_set_evbit(fd, libc::c_ulong::from(bit)),
                Request::SetKeyBit(code) => ui_set_keybit(fd, libc::c_ulong::from(code)),
                Request::DevCreate => ui_dev_create(fd),
                Request::DevDestroy => ui_dev_destroy(fd),
            }
        };
        ret.map(|_| ()).map_err(io::Error::from)
    }

    fn close(&mut self, handle: File) {
        drop(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("vkbd_test_{}_{}", name, std::process::id()))
    }

    #[test]
    fn test_open_missing_node_is_not_found() {
        let mut backend = SystemBackend::new();
        let err = backend
            .open(Path::new("/nonexistent/vkbd/uinput"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_control_on_regular_file_fails() {
        let path = temp_path("control");
        let file = File::create(&path).unwrap();
        let mut backend = SystemBackend::new();
        let err = backend.control(&file, Request::DevCreate).unwrap_err();
        assert_eq!(err.raw_os_error(), Some(libc::ENOTTY));
        backend.close(file);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_to_regular_file() {
        let path = temp_path("write");
        let mut backend = SystemBackend::new();
        File::create(&path).unwrap();
        let file = backend.open(&path).unwrap();
        assert_eq!(backend.write(&file, b"abcd").unwrap(), 4);
        backend.close(file);
        assert_eq!(std::fs::read(&path).unwrap(), b"abcd");
        std::fs::remove_file(&path).unwrap();
    }
}
