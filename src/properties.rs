//! System property access
//!
//! On Android properties come straight from bionic's property area. Host
//! builds shell out to `getprop`, which also works under libhybris containers.

use crate::{Error, Result};
use std::collections::HashMap;

/// Read-only view of the system property tree
pub trait PropertySource: Send + Sync {
    /// Value of `key`, or `None` when unset or empty
    fn get(&self, key: &str) -> Option<String>;
}

impl<T: PropertySource + ?Sized> PropertySource for Box<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// The device's real property tree
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProperties;

impl SystemProperties {
    #[cfg(target_os = "android")]
    fn read(key: &str) -> Result<String> {
        use crate::ffi::{__system_property_get, PROP_VALUE_MAX};
        use std::ffi::{CStr, CString};
        use libc::c_char;

        let c_key = CString::new(key).map_err(|e| Error::Property(e.to_string()))?;
        let mut buffer = [0u8; PROP_VALUE_MAX];
        let len = unsafe {
            __system_property_get(c_key.as_ptr(), buffer.as_mut_ptr() as *mut c_char)
        };
        if len <= 0 {
            return Ok(String::new());
        }

        let value = CStr::from_bytes_until_nul(&buffer)
            .map_err(|e| Error::Property(e.to_string()))?;
        Ok(value.to_string_lossy().into_owned())
    }

    #[cfg(not(target_os = "android"))]
    fn read(key: &str) -> Result<String> {
        let output = std::process::Command::new("getprop").arg(key).output()?;
        if !output.status.success() {
            return Err(Error::Property(format!(
                "getprop {} exited with {}",
                key, output.status
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl PropertySource for SystemProperties {
    fn get(&self, key: &str) -> Option<String> {
        match Self::read(key) {
            Ok(value) if value.is_empty() => None,
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!("Failed to read property {}: {}", key, e);
                None
            }
        }
    }
}

/// Fixed in-memory properties, used for overrides and tests
#[derive(Debug, Clone, Default)]
pub struct MapProperties {
    values: HashMap<String, String>,
}

impl MapProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }
}

impl PropertySource for MapProperties {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).filter(|v| !v.is_empty()).cloned()
    }
}
