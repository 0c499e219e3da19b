//! Raw bindings to bionic
//!
//! Only linked when building for Android; host builds fall back to `getprop`.

#[cfg(target_os = "android")]
use libc::{c_char, c_int};

/// Maximum property value length including the terminating NUL
pub const PROP_VALUE_MAX: usize = 92;

#[cfg(target_os = "android")]
extern "C" {
    pub fn __system_property_get(name: *const c_char, value: *mut c_char) -> c_int;
}
