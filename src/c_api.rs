//! C API for the host service wrapper
//!
//! The HIDL/AIDL stub that registers with the service manager is generated C++.
//! It loads this library, creates one adapter with a callback into the vendor
//! fingerprint proxy, and forwards each interface method here.
//!
//! All functions accept a null handle and return a neutral value for it.

#![allow(non_camel_case_types)]

use crate::config::FodConfig;
use crate::inscreen::{FingerprintInscreen, FodController};
use crate::vendor::{ExtCmdFn, ExtCmdHandle};
use crate::{Error, Result};
use libc::{c_char, c_int, c_void};
use std::ffi::CStr;
use std::path::Path;
use std::ptr;
use tracing::{debug, error, info};

type Controller = FodController<ExtCmdHandle>;

/// Opaque adapter handle
pub struct fod_inscreen {
    inner: Controller,
}

unsafe fn controller<'a>(handle: *const fod_inscreen, op: &str) -> Result<&'a Controller> {
    handle
        .as_ref()
        .map(|h| &h.inner)
        .ok_or_else(|| Error::InvalidHandle(format!("{} called with null handle", op)))
}

unsafe fn with_controller<T>(
    handle: *const fod_inscreen,
    op: &str,
    fallback: T,
    f: impl FnOnce(&Controller) -> T,
) -> T {
    match controller(handle, op) {
        Ok(c) => f(c),
        Err(e) => {
            error!("{}", e);
            fallback
        }
    }
}

// =============================================================================
// Lifecycle
// =============================================================================

/// Create an adapter
///
/// `config_path` may be null to use the built-in device defaults. `ext_cmd` is
/// called with `ctx` for every vendor command; both must stay valid until
/// `fod_inscreen_destroy`.
#[no_mangle]
pub unsafe extern "C" fn fod_inscreen_create(
    config_path: *const c_char,
    ext_cmd: Option<ExtCmdFn>,
    ctx: *mut c_void,
) -> *mut fod_inscreen {
    crate::logging::init_library();

    let Some(ext_cmd) = ext_cmd else {
        error!("fod_inscreen_create: no vendor extCmd callback");
        return ptr::null_mut();
    };

    let config = if config_path.is_null() {
        FodConfig::default()
    } else {
        match CStr::from_ptr(config_path).to_str() {
            Ok(path) => FodConfig::load_or_default(Some(Path::new(path))),
            Err(e) => {
                error!("fod_inscreen_create: config path is not UTF-8: {}", e);
                FodConfig::default()
            }
        }
    };

    let vendor = ExtCmdHandle::new(ext_cmd, ctx);
    let handle = Box::new(fod_inscreen {
        inner: FodController::new(config, vendor),
    });
    info!("fod_inscreen_create -> {:p}", &*handle);
    Box::into_raw(handle)
}

#[no_mangle]
pub unsafe extern "C" fn fod_inscreen_destroy(handle: *mut fod_inscreen) {
    if handle.is_null() {
        return;
    }
    debug!("fod_inscreen_destroy({:p})", handle);
    drop(Box::from_raw(handle));
}

// =============================================================================
// Queries
// =============================================================================

#[no_mangle]
pub unsafe extern "C" fn fod_inscreen_get_position_x(handle: *const fod_inscreen) -> c_int {
    with_controller(handle, "get_position_x", -1, |c| c.get_position_x())
}

#[no_mangle]
pub unsafe extern "C" fn fod_inscreen_get_position_y(handle: *const fod_inscreen) -> c_int {
    with_controller(handle, "get_position_y", -1, |c| c.get_position_y())
}

#[no_mangle]
pub unsafe extern "C" fn fod_inscreen_get_size(handle: *const fod_inscreen) -> c_int {
    with_controller(handle, "get_size", -1, |c| c.get_size())
}

#[no_mangle]
pub unsafe extern "C" fn fod_inscreen_get_dim_amount(
    handle: *const fod_inscreen,
    brightness: c_int,
) -> c_int {
    with_controller(handle, "get_dim_amount", -1, |c| c.get_dim_amount(brightness))
}

#[no_mangle]
pub unsafe extern "C" fn fod_inscreen_should_boost_brightness(handle: *const fod_inscreen) -> bool {
    with_controller(handle, "should_boost_brightness", false, |c| c.should_boost_brightness())
}

// =============================================================================
// Events
// =============================================================================

#[no_mangle]
pub unsafe extern "C" fn fod_inscreen_on_start_enroll(handle: *const fod_inscreen) {
    with_controller(handle, "on_start_enroll", (), |c| c.on_start_enroll())
}

#[no_mangle]
pub unsafe extern "C" fn fod_inscreen_on_finish_enroll(handle: *const fod_inscreen) {
    with_controller(handle, "on_finish_enroll", (), |c| c.on_finish_enroll())
}

#[no_mangle]
pub unsafe extern "C" fn fod_inscreen_switch_hbm(handle: *const fod_inscreen, enabled: bool) {
    with_controller(handle, "switch_hbm", (), |c| c.switch_hbm(enabled))
}

#[no_mangle]
pub unsafe extern "C" fn fod_inscreen_on_press(handle: *const fod_inscreen) {
    with_controller(handle, "on_press", (), |c| c.on_press())
}

#[no_mangle]
pub unsafe extern "C" fn fod_inscreen_on_release(handle: *const fod_inscreen) {
    with_controller(handle, "on_release", (), |c| c.on_release())
}

#[no_mangle]
pub unsafe extern "C" fn fod_inscreen_on_show_fod_view(handle: *const fod_inscreen) {
    with_controller(handle, "on_show_fod_view", (), |c| c.on_show_fod_view())
}

#[no_mangle]
pub unsafe extern "C" fn fod_inscreen_on_hide_fod_view(handle: *const fod_inscreen) {
    with_controller(handle, "on_hide_fod_view", (), |c| c.on_hide_fod_view())
}

#[no_mangle]
pub unsafe extern "C" fn fod_inscreen_handle_acquired(
    handle: *const fod_inscreen,
    acquired_info: c_int,
    vendor_code: c_int,
) -> bool {
    with_controller(handle, "handle_acquired", false, |c| {
        c.handle_acquired(acquired_info, vendor_code)
    })
}

#[no_mangle]
pub unsafe extern "C" fn fod_inscreen_handle_error(
    handle: *const fod_inscreen,
    error: c_int,
    vendor_code: c_int,
) -> bool {
    with_controller(handle, "handle_error", false, |c| c.handle_error(error, vendor_code))
}

#[no_mangle]
pub unsafe extern "C" fn fod_inscreen_set_long_press_enabled(
    handle: *const fod_inscreen,
    enabled: bool,
) {
    with_controller(handle, "set_long_press_enabled", (), |c| {
        c.set_long_press_enabled(enabled)
    })
}

/// The framework callback object stays owned by the caller and is never used
#[no_mangle]
pub unsafe extern "C" fn fod_inscreen_set_callback(
    handle: *const fod_inscreen,
    callback: *mut c_void,
) {
    with_controller(handle, "set_callback", (), |c| {
        debug!("set_callback({:p})", callback);
        c.set_callback(None)
    })
}
