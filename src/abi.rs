//! Binary layouts and control requests of the uinput interface.
//!
//! The structures come from `libc` (`linux/uinput.h`, `linux/input.h`); this
//! module fills them the way the kernel expects and exposes their bytes for
//! a single `write(2)`.

use std::mem::{self, size_of};
use std::slice;

pub use libc::{ABS_CNT, UINPUT_MAX_NAME_SIZE, input_event, input_id, uinput_user_dev};

nix::ioctl_none!(ui_dev_create, b'U', 1);
nix::ioctl_none!(ui_dev_destroy, b'U', 2);
nix::ioctl_write_int!(ui_set_evbit, b'U', 100);
nix::ioctl_write_int!(ui_set_keybit, b'U', 101);

const _: () = assert!(size_of::<uinput_user_dev>() == 1116);

/// Kernel structures made only of integer fields with no interior padding.
///
/// # Safety
///
/// Implementors must have every byte initialised once zeroed.
pub unsafe trait Plain: Copy {}

// SAFETY: name, input_id, u32 and four i32 arrays; 1116 bytes, no padding.
unsafe impl Plain for uinput_user_dev {}
// SAFETY: a time pair followed by u16, u16, i32 on every Linux target.
unsafe impl Plain for input_event {}

/// All-zero value, the equivalent of `memset(&v, 0, sizeof(v))`.
pub fn zeroed<T: Plain>() -> T {
    // SAFETY: integer-only structures are valid when all bits are zero.
    unsafe { mem::zeroed() }
}

pub fn as_bytes<T: Plain>(value: &T) -> &[u8] {
    // SAFETY: `Plain` guarantees every byte of `T` is initialised.
    unsafe { slice::from_raw_parts((value as *const T).cast::<u8>(), size_of::<T>()) }
}

/// Build a legacy device descriptor carrying `name` and `id`.
///
/// Names longer than the field are cut at [`UINPUT_MAX_NAME_SIZE`] bytes
/// with no terminating NUL, the same as `strncpy` into the C struct.
pub fn user_dev(name: &str, id: input_id) -> uinput_user_dev {
    let mut dev: uinput_user_dev = zeroed();
    for (dst, &src) in dev.name.iter_mut().zip(name.as_bytes()) {
        *dst = src as libc::c_char;
    }
    dev.id = id;
    dev
}

/// A zeroed event carrying the given triple. The kernel stamps the time.
pub fn event(type_: u16, code: u16, value: i32) -> input_event {
    let mut ev: input_event = zeroed();
    ev.type_ = type_;
    ev.code = code;
    ev.value = value;
    ev
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_numbers_match_kernel_headers() {
        let int = size_of::<libc::c_int>();
        assert_eq!(nix::request_code_none!(b'U', 1) as u32, 0x5501);
        assert_eq!(nix::request_code_none!(b'U', 2) as u32, 0x5502);
        assert_eq!(nix::request_code_write!(b'U', 100, int) as u32, 0x4004_5564);
        assert_eq!(nix::request_code_write!(b'U', 101, int) as u32, 0x4004_5565);
    }

    #[test]
    fn test_descriptor_layout() {
        let id = input_id {
            bustype: 0x03,
            vendor: 1,
            product: 1,
            version: 1,
        };
        let dev = user_dev("kbd", id);
        let bytes = as_bytes(&dev);
        assert_eq!(bytes.len(), 1116);
        assert_eq!(&bytes[..3], b"kbd");
        assert!(bytes[3..UINPUT_MAX_NAME_SIZE].iter().all(|&b| b == 0));
        assert_eq!(&bytes[80..82], &0x03u16.to_ne_bytes());
        assert_eq!(&bytes[82..84], &1u16.to_ne_bytes());
        assert_eq!(&bytes[84..86], &1u16.to_ne_bytes());
        assert_eq!(&bytes[86..88], &1u16.to_ne_bytes());
        assert!(bytes[88..].iter().all(|&b| b == 0));
        assert_eq!(dev.absmax.len(), ABS_CNT);
    }

    #[test]
    fn test_long_name_is_truncated() {
        let name = "x".repeat(200);
        let dev = user_dev(&name, zeroed_id());
        assert!(dev.name.iter().all(|&b| b == b'x' as libc::c_char));
        assert_eq!(dev.id.bustype, 0);
    }

    #[test]
    fn test_event_layout() {
        let ev = event(1, 30, -1);
        let bytes = as_bytes(&ev);
        assert_eq!(bytes.len(), size_of::<input_event>());
        let off = bytes.len() - 8;
        assert!(bytes[..off].iter().all(|&b| b == 0));
        assert_eq!(&bytes[off..off + 2], &1u16.to_ne_bytes());
        assert_eq!(&bytes[off + 2..off + 4], &30u16.to_ne_bytes());
        assert_eq!(&bytes[off + 4..off + 8], &(-1i32).to_ne_bytes());
    }

    fn zeroed_id() -> input_id {
        input_id {
            bustype: 0,
            vendor: 0,
            product: 0,
            version: 0,
        }
    }
}
