//! Device configuration
//!
//! Every path, property name and magic command code the adapter touches lives
//! here. `FodConfig::default()` carries the values for the stock device; a TOML
//! file can override any subset of them:
//!
//! ```toml
//! [sensor]
//! x = 540
//!
//! [display]
//! fod_status_path = "/sys/devices/virtual/touch/tp_dev/fod_status"
//! ```

use crate::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Sensor placement defaults and the properties that override them
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    pub x: i32,
    pub y: i32,
    pub size: i32,
    /// Property holding "X,Y"
    pub offset_prop: String,
    /// Property holding "W,H"
    pub size_prop: String,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            x: 455,
            y: 1910,
            size: 190,
            offset_prop: "persist.vendor.sys.fp.fod.location.X_Y".to_string(),
            size_prop: "persist.vendor.sys.fp.fod.size.width_height".to_string(),
        }
    }
}

/// Panel control nodes
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub disp_param_path: PathBuf,
    pub hbm_on: String,
    pub hbm_off: String,
    pub fod_status_path: PathBuf,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            disp_param_path: PathBuf::from(
                "/sys/devices/platform/soc/ae00000.qcom,mdss_mdp/drm/card0/card0-DSI-1/disp_param",
            ),
            hbm_on: "0x20000".to_string(),
            hbm_off: "0xE0000".to_string(),
            fod_status_path: PathBuf::from("/sys/devices/virtual/touch/tp_dev/fod_status"),
        }
    }
}

/// Vendor fingerprint service command codes
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VendorConfig {
    /// extCmd id selecting the panel nit mode
    pub nit_command: i32,
    pub nit_fod_param: i32,
    pub nit_none_param: i32,
    /// error/vendor code pair the framework may swallow
    pub retry_error: i32,
    pub retry_vendor_code: i32,
}

impl Default for VendorConfig {
    fn default() -> Self {
        Self {
            nit_command: 10,
            nit_fod_param: 1,
            nit_none_param: 0,
            retry_error: 8,
            retry_vendor_code: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WakeLockConfig {
    pub name: String,
    pub lock_path: PathBuf,
    pub unlock_path: PathBuf,
}

impl Default for WakeLockConfig {
    fn default() -> Self {
        Self {
            name: "FingerprintInscreenService".to_string(),
            lock_path: PathBuf::from("/sys/power/wake_lock"),
            unlock_path: PathBuf::from("/sys/power/wake_unlock"),
        }
    }
}

/// Complete adapter configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FodConfig {
    pub sensor: SensorConfig,
    pub display: DisplayConfig,
    pub vendor: VendorConfig,
    pub wake_lock: WakeLockConfig,
}

impl FodConfig {
    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        tracing::info!("Loaded FOD config from {:?}", path);
        Ok(config)
    }

    /// Load from `path` if given, falling back to defaults on any failure
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load FOD config {:?}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }
}
