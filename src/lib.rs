//! # vkbd
//!
//! Register a synthetic keyboard with the Linux `uinput` driver and inject
//! raw key events into the input subsystem.
//!
//! ## Quick Start
//!
//! ```no_run
//! use vkbd::VirtualKeyboard;
//! use vkbd::codes::{KEY_H, KEY_I};
//!
//! let mut kbd = VirtualKeyboard::new("vkbd demo", &[KEY_H, KEY_I])?;
//! for key in [KEY_H, KEY_I] {
//!     kbd.press(key)?;
//!     kbd.release(key)?;
//! }
//! # Ok::<(), vkbd::Error>(())
//! ```
//!
//! ## Lifecycle
//!
//! Construction probes the candidate device nodes in order, writes the
//! device descriptor, declares the key capabilities and creates the device.
//! Creation is followed by a blocking settle delay, since events written
//! immediately afterwards can be lost. Dropping the keyboard destroys the
//! device and closes the node, including after a failed construction.
//!
//! Key codes are plain `u16` values from `linux/input-event-codes.h`; the
//! [`codes`] module names the common ones. Emission does not check codes
//! against the declared set.

mod abi;
pub mod backend;
pub mod codes;
pub mod config;
pub mod device;
pub mod error;
pub mod event;

mod platform;

// Re-exports
pub use backend::{Backend, Request};
pub use config::DeviceConfig;
pub use device::VirtualKeyboard;
pub use error::{Error, Result};
pub use event::{InputEvent, KeyState};
pub use platform::SystemBackend;
