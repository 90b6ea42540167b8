//! The virtual keyboard and its lifecycle.
//!
//! A [`VirtualKeyboard`] goes through four phases when constructed:
//!
//! 1. **probe**: open the first candidate device node that exists
//! 2. **describe**: write the device descriptor and declare key capabilities
//! 3. **activate**: ask the kernel to create the device, then settle
//! 4. **operate**: [`emit`](VirtualKeyboard::emit) events until dropped
//!
//! Teardown runs on drop whichever phase was reached, and releases the
//! handle exactly once.

use crate::abi;
use crate::backend::{Backend, Request};
use crate::codes::{BUS_USB, EV_KEY, KEY_RESERVED};
use crate::config::DeviceConfig;
use crate::error::{Error, Result};
use crate::event::{InputEvent, KeyState};
use crate::platform::SystemBackend;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Identity reported for the device. It matches no real hardware.
const DEVICE_ID: abi::input_id = abi::input_id {
    bustype: BUS_USB,
    vendor: 1,
    product: 1,
    version: 1,
};

/// A synthetic keyboard registered with the kernel input subsystem.
///
/// # Example
///
/// ```no_run
/// use vkbd::VirtualKeyboard;
/// use vkbd::codes::{EV_KEY, KEY_A};
///
/// let mut kbd = VirtualKeyboard::new("my keyboard", &[KEY_A])?;
/// kbd.emit(EV_KEY, KEY_A, 1)?;
/// kbd.sync()?;
/// kbd.emit(EV_KEY, KEY_A, 0)?;
/// kbd.sync()?;
/// # Ok::<(), vkbd::Error>(())
/// ```
pub struct VirtualKeyboard<B: Backend = SystemBackend> {
    backend: B,
    handle: Option<B::Handle>,
    path: Option<PathBuf>,
    active: bool,
}

impl VirtualKeyboard<SystemBackend> {
    /// Create a keyboard named `name` that can emit `keys`.
    ///
    /// Blocks for the settle delay (one second by default) once the device
    /// has been created.
    pub fn new(name: &str, keys: &[u16]) -> Result<Self> {
        Self::with_config(DeviceConfig::default().with_name(name), keys)
    }

    pub fn with_config(config: DeviceConfig, keys: &[u16]) -> Result<Self> {
        Self::with_backend(SystemBackend::new(), config, keys)
    }
}

impl<B: Backend> VirtualKeyboard<B> {
    /// Bring up a keyboard over a custom [`Backend`].
    ///
    /// On failure, whatever was acquired before the failing phase is
    /// released before the error is returned.
    pub fn with_backend(backend: B, config: DeviceConfig, keys: &[u16]) -> Result<Self> {
        let mut device = Self {
            backend,
            handle: None,
            path: None,
            active: false,
        };
        device.probe_and_open(&config.candidate_paths)?;
        device.describe(&config.name, keys)?;
        device.activate(config.settle_delay())?;
        Ok(device)
    }

    fn probe_and_open(&mut self, candidates: &[PathBuf]) -> Result<()> {
        for path in candidates {
            match self.backend.open(path) {
                Ok(handle) => {
                    log::info!("Opened {}", path.display());
                    self.handle = Some(handle);
                    self.path = Some(path.clone());
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::debug!("{} does not exist, trying next candidate", path.display());
                }
                Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                    log::error!(
                        "Permission denied opening {}. Check you have permission to uinput.",
                        path.display()
                    );
                    return Err(Error::PermissionDenied { path: path.clone() });
                }
                Err(e) => {
                    log::error!(
                        "Failed to open {}: {} {}",
                        path.display(),
                        e.raw_os_error().unwrap_or(0),
                        e
                    );
                    return Err(Error::Open {
                        path: path.clone(),
                        source: e,
                    });
                }
            }
        }

        log::error!("uinput was not found. Is the uinput module loaded?");
        Err(Error::NotFound {
            candidates: candidates.to_vec(),
        })
    }

    fn describe(&mut self, name: &str, keys: &[u16]) -> Result<()> {
        let Some(handle) = self.handle.as_ref() else {
            return Err(Error::Setup("device is not open".into()));
        };

        let descriptor = abi::user_dev(name, DEVICE_ID);
        let bytes = abi::as_bytes(&descriptor);
        let written = self
            .backend
            .write(handle, bytes)
            .map_err(|e| Error::Setup(format!("descriptor write failed: {e}")))?;
        if written != bytes.len() {
            return Err(Error::Setup(format!(
                "short descriptor write ({} of {} bytes)",
                written,
                bytes.len()
            )));
        }

        // Every declaration is attempted; failures are reported together.
        let mut failed = 0usize;
        let mut declare = |request: Request| {
            if let Err(e) = self.backend.control(handle, request) {
                log::warn!("{:?} failed: {}", request, e);
                failed += 1;
            }
        };
        declare(Request::SetEventBit(EV_KEY));
        let mut declared = 1usize;
        for &code in keys.iter().filter(|&&code| code != KEY_RESERVED) {
            declare(Request::SetKeyBit(code));
            declared += 1;
        }
        log::debug!("Declared {} capabilities for {:?}", declared, name);

        if failed > 0 {
            return Err(Error::Setup(format!(
                "{failed} of {declared} capability declarations failed"
            )));
        }
        Ok(())
    }

    fn activate(&mut self, settle_delay: Duration) -> Result<()> {
        let Some(handle) = self.handle.as_ref() else {
            return Err(Error::Setup("device is not open".into()));
        };

        self.backend
            .control(handle, Request::DevCreate)
            .map_err(Error::Creation)?;
        self.active = true;
        log::info!("Created uinput device");

        self.backend.settle(settle_delay);
        Ok(())
    }

    /// Write one event. Visible to consumers after the next [`sync`](Self::sync).
    ///
    /// `code` is passed through to the kernel without checking it against
    /// the declared keys.
    pub fn emit(&mut self, event_type: u16, code: u16, value: i32) -> Result<()> {
        self.write_event(InputEvent::new(event_type, code, value))
    }

    pub fn write_event(&mut self, event: InputEvent) -> Result<()> {
        let handle = match self.handle.as_ref() {
            Some(handle) if self.active => handle,
            _ => {
                return Err(Error::Emission {
                    detail: "device is not active".into(),
                    source: None,
                });
            }
        };

        let raw = event.to_raw();
        let bytes = abi::as_bytes(&raw);
        match self.backend.write(handle, bytes) {
            Ok(n) if n == bytes.len() => Ok(()),
            Ok(n) => Err(Error::Emission {
                detail: format!("short write of {:?} ({} of {} bytes)", event, n, bytes.len()),
                source: None,
            }),
            Err(e) => {
                log::error!("Failed to write {:?}: {} {}", event, e.raw_os_error().unwrap_or(0), e);
                Err(Error::Emission {
                    detail: format!("{:?}: {}", event, e),
                    source: Some(e),
                })
            }
        }
    }

    /// Emit `SYN_REPORT`, closing the current input frame.
    pub fn sync(&mut self) -> Result<()> {
        self.write_event(InputEvent::sync())
    }

    /// Press `code` and sync.
    pub fn press(&mut self, code: u16) -> Result<()> {
        self.write_event(InputEvent::key(code, KeyState::Pressed))?;
        self.sync()
    }

    /// Release `code` and sync.
    pub fn release(&mut self, code: u16) -> Result<()> {
        self.write_event(InputEvent::key(code, KeyState::Released))?;
        self.sync()
    }

    /// The candidate path that was opened, if the device is still open.
    pub fn opened_path(&self) -> Option<&Path> {
        self.handle.as_ref().and(self.path.as_deref())
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// Remove the device and release the handle.
    ///
    /// Safe to call repeatedly; only the first call on an open device does
    /// anything. Control failures during teardown are logged and dropped.
    pub fn destroy(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        if let Err(e) = self.backend.control(&handle, Request::DevDestroy) {
            log::warn!("UI_DEV_DESTROY failed: {}", e);
        }
        self.backend.close(handle);
        self.active = false;
    }
}

impl<B: Backend> Drop for VirtualKeyboard<B> {
    fn drop(&mut self) {
        self.destroy();
    }
}
