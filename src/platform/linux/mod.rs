//! Linux platform implementation.
//!
//! Talks to the kernel's uinput driver through its character device.
//!
//! ## Permissions
//!
//! Writing to `/dev/uinput` usually requires either root or a udev rule:
//! ```bash
//! echo 'KERNEL=="uinput", GROUP="input", MODE="0660"' | \
//!     sudo tee /etc/udev/rules.d/99-uinput.rules
//! sudo usermod -aG input $USER
//! # Then log out and back in
//! ```
//!
//! If no node exists at all, load the module with `sudo modprobe uinput`.

mod uinput;

pub use uinput::SystemBackend;
