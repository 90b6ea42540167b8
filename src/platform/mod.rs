//! Platform-specific implementations.

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
pub use linux::*;

// uinput is a Linux kernel facility
#[cfg(not(target_os = "linux"))]
compile_error!("vkbd only supports Linux");
