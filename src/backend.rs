//! The system-call seam between the device lifecycle and the kernel.

use std::io;
use std::path::Path;
use std::thread;
use std::time::Duration;

/// A control request issued on an open uinput handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Declare an event type the device may emit (`UI_SET_EVBIT`).
    SetEventBit(u16),
    /// Declare a key code the device may emit (`UI_SET_KEYBIT`).
    SetKeyBit(u16),
    /// Instantiate the described device (`UI_DEV_CREATE`).
    DevCreate,
    /// Remove the device from the input subsystem (`UI_DEV_DESTROY`).
    DevDestroy,
}

/// Low-level operations a [`VirtualKeyboard`](crate::VirtualKeyboard) drives.
///
/// [`SystemBackend`](crate::SystemBackend) talks to the kernel. Other
/// implementations can substitute the device node, e.g. to record traffic.
pub trait Backend {
    /// An open device node.
    type Handle;

    /// Open `path` for writing.
    fn open(&mut self, path: &Path) -> io::Result<Self::Handle>;

    /// Perform a single write and report how many bytes were accepted.
    ///
    /// Must not loop on short writes; the caller treats them as failures.
    fn write(&mut self, handle: &Self::Handle, bytes: &[u8]) -> io::Result<usize>;

    /// Issue a control request.
    fn control(&mut self, handle: &Self::Handle, request: Request) -> io::Result<()>;

    /// Release the handle.
    fn close(&mut self, handle: Self::Handle);

    /// Block until a freshly created device is ready for events.
    fn settle(&mut self, delay: Duration) {
        thread::sleep(delay);
    }
}
