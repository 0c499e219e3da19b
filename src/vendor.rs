//! Vendor fingerprint service
//!
//! The proprietary service exposes a single escape hatch, `extCmd`, which the
//! adapter uses to switch the panel into and out of its FOD nit mode.

use libc::{c_int, c_void};
use std::sync::Arc;
use tracing::info;

pub trait VendorFingerprint: Send + Sync {
    /// Forward a vendor command. The return code is opaque to callers.
    fn ext_cmd(&self, command: i32, param: i32) -> i32;
}

impl<T: VendorFingerprint + ?Sized> VendorFingerprint for Box<T> {
    fn ext_cmd(&self, command: i32, param: i32) -> i32 {
        (**self).ext_cmd(command, param)
    }
}

impl<T: VendorFingerprint + ?Sized> VendorFingerprint for Arc<T> {
    fn ext_cmd(&self, command: i32, param: i32) -> i32 {
        (**self).ext_cmd(command, param)
    }
}

/// C callback signature for `extCmd`, receiving the host's context pointer
pub type ExtCmdFn = unsafe extern "C" fn(ctx: *mut c_void, command: c_int, param: c_int) -> c_int;

/// Vendor service reached through a host-supplied function pointer
///
/// The host's HIDL/AIDL stub owns the real service proxy and keeps `ctx` alive
/// for as long as the adapter exists.
pub struct ExtCmdHandle {
    func: ExtCmdFn,
    ctx: *mut c_void,
}

impl ExtCmdHandle {
    /// # Safety
    ///
    /// `func` must be safe to call with `ctx` from any thread until the handle
    /// is dropped.
    pub unsafe fn new(func: ExtCmdFn, ctx: *mut c_void) -> Self {
        Self { func, ctx }
    }
}

impl VendorFingerprint for ExtCmdHandle {
    fn ext_cmd(&self, command: i32, param: i32) -> i32 {
        unsafe { (self.func)(self.ctx, command, param) }
    }
}

unsafe impl Send for ExtCmdHandle {}
unsafe impl Sync for ExtCmdHandle {}

/// Stand-in service that only logs, for bring-up without the vendor blob
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingVendor;

impl VendorFingerprint for LoggingVendor {
    fn ext_cmd(&self, command: i32, param: i32) -> i32 {
        info!("extCmd({}, {})", command, param);
        0
    }
}
