//! In-display fingerprint (FOD) sensor adapter
//!
//! Implements the control surface the biometrics framework expects from an
//! under-display fingerprint sensor: where the sensor sits, how to light it,
//! and what to do when a finger lands on it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │        Biometrics framework (FingerprintInscreen HAL)       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                 C ABI (c_api) / FingerprintInscreen
//!                              │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        fod-inscreen                         │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────┐  │
//! │  │ geometry    │  │ dim curve   │  │ press / HBM / view  │  │
//! │  │ (props)     │  │ (gamma)     │  │ (sysfs, wake lock)  │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//!               │                                │
//!        system properties               vendor fingerprint
//!        + sysfs nodes                   service (extCmd)
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use fod_inscreen::{FingerprintInscreen, FodConfig, FodController, LoggingVendor};
//!
//! let fod = FodController::new(FodConfig::default(), LoggingVendor);
//! let (x, y) = (fod.get_position_x(), fod.get_position_y());
//! fod.on_press();
//! fod.on_release();
//! ```

pub mod c_api;
pub mod config;
pub mod dim;
pub mod error;
pub mod ffi;
pub mod geometry;
pub mod inscreen;
pub mod logging;
pub mod properties;
pub mod sysfs;
pub mod vendor;
pub mod wakelock;

#[cfg(test)]
mod testing;

pub use config::FodConfig;
pub use error::Error;
pub use geometry::SensorGeometry;
pub use inscreen::{FingerprintInscreen, FingerprintInscreenCallback, FodController};
pub use properties::{MapProperties, PropertySource, SystemProperties};
pub use vendor::{LoggingVendor, VendorFingerprint};

/// Result type for this crate
pub type Result<T> = std::result::Result<T, Error>;
