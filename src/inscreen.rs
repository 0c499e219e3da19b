//! In-display fingerprint control surface
//!
//! [`FingerprintInscreen`] is the method set the biometrics framework drives.
//! [`FodController`] implements it for panels that switch HBM through
//! `disp_param` and take the FOD nit mode from the vendor fingerprint service.
//!
//! Every method returns promptly and never fails: I/O errors are logged and
//! dropped, since the nodes are scalar toggles the next event overwrites.

use crate::config::FodConfig;
use crate::dim::dim_amount;
use crate::geometry::SensorGeometry;
use crate::properties::{PropertySource, SystemProperties};
use crate::sysfs;
use crate::vendor::VendorFingerprint;
use crate::wakelock::{SysfsWakeLock, WakeLock, WakeLockGuard};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Framework callback for finger down/up notifications
pub trait FingerprintInscreenCallback: Send + Sync {
    fn on_finger_down(&self);
    fn on_finger_up(&self);
}

/// Host-facing FOD interface
pub trait FingerprintInscreen: Send + Sync {
    fn get_position_x(&self) -> i32;
    fn get_position_y(&self) -> i32;
    fn get_size(&self) -> i32;

    fn on_start_enroll(&self);
    fn on_finish_enroll(&self);

    fn switch_hbm(&self, enabled: bool);

    fn on_press(&self);
    fn on_release(&self);

    fn on_show_fod_view(&self);
    fn on_hide_fod_view(&self);

    /// Returns true if the acquired message was consumed here
    fn handle_acquired(&self, acquired_info: i32, vendor_code: i32) -> bool;
    /// Returns true if the framework should not surface this error
    fn handle_error(&self, error: i32, vendor_code: i32) -> bool;

    fn set_long_press_enabled(&self, enabled: bool);

    fn get_dim_amount(&self, brightness: i32) -> i32;
    fn should_boost_brightness(&self) -> bool;

    fn set_callback(&self, callback: Option<Arc<dyn FingerprintInscreenCallback>>);
}

/// FOD adapter backed by sysfs nodes and the vendor fingerprint service
pub struct FodController<V, P = SystemProperties, W = SysfsWakeLock> {
    config: FodConfig,
    vendor: V,
    props: P,
    wake_lock: WakeLockGuard<W>,
}

impl<V: VendorFingerprint> FodController<V> {
    /// Adapter using the real property tree and kernel wake lock
    pub fn new(config: FodConfig, vendor: V) -> Self {
        let wake_lock = SysfsWakeLock::from_config(&config.wake_lock);
        Self::with_parts(config, vendor, SystemProperties, wake_lock)
    }
}

impl<V, P, W> FodController<V, P, W>
where
    V: VendorFingerprint,
    P: PropertySource,
    W: WakeLock,
{
    pub fn with_parts(config: FodConfig, vendor: V, props: P, wake_lock: W) -> Self {
        info!(
            disp_param = %config.display.disp_param_path.display(),
            fod_status = %config.display.fod_status_path.display(),
            "FOD controller ready"
        );
        let wake_lock = WakeLockGuard::new(wake_lock, config.wake_lock.name.clone());
        Self {
            config,
            vendor,
            props,
            wake_lock,
        }
    }

    pub fn config(&self) -> &FodConfig {
        &self.config
    }

    /// All three placement values from a single property read
    pub fn geometry(&self) -> SensorGeometry {
        SensorGeometry::read(&self.props, &self.config.sensor)
    }

    /// Whether a press is currently holding the wake lock
    pub fn is_pressed(&self) -> bool {
        self.wake_lock.is_held()
    }

    /// Release the wake lock even if this instance never took it, for
    /// recovering from a press left unfinished by another process
    pub fn release_wake_lock(&self) -> bool {
        self.wake_lock.force_release()
    }

    fn nit_mode(&self, param: i32) {
        let ret = self.vendor.ext_cmd(self.config.vendor.nit_command, param);
        debug!("extCmd({}, {}) = {}", self.config.vendor.nit_command, param, ret);
    }
}

impl<V, P, W> FingerprintInscreen for FodController<V, P, W>
where
    V: VendorFingerprint,
    P: PropertySource,
    W: WakeLock,
{
    fn get_position_x(&self) -> i32 {
        self.geometry().x
    }

    fn get_position_y(&self) -> i32 {
        self.geometry().y
    }

    fn get_size(&self) -> i32 {
        self.geometry().size
    }

    fn on_start_enroll(&self) {}

    fn on_finish_enroll(&self) {}

    fn switch_hbm(&self, enabled: bool) {
        let display = &self.config.display;
        let value = if enabled { &display.hbm_on } else { &display.hbm_off };
        sysfs::set(&display.disp_param_path, value);
    }

    fn on_press(&self) {
        self.wake_lock.acquire();
        self.nit_mode(self.config.vendor.nit_fod_param);
    }

    fn on_release(&self) {
        self.wake_lock.release();
        self.nit_mode(self.config.vendor.nit_none_param);
    }

    fn on_show_fod_view(&self) {
        sysfs::set(&self.config.display.fod_status_path, 1);
    }

    fn on_hide_fod_view(&self) {
        sysfs::set(&self.config.display.fod_status_path, 0);
    }

    fn handle_acquired(&self, acquired_info: i32, vendor_code: i32) -> bool {
        error!("acquiredInfo: {}, vendorCode: {}", acquired_info, vendor_code);
        false
    }

    fn handle_error(&self, error: i32, vendor_code: i32) -> bool {
        error!("error: {}, vendorCode: {}", error, vendor_code);
        let retry = &self.config.vendor;
        error == retry.retry_error && vendor_code == retry.retry_vendor_code
    }

    fn set_long_press_enabled(&self, _enabled: bool) {}

    fn get_dim_amount(&self, brightness: i32) -> i32 {
        dim_amount(brightness)
    }

    fn should_boost_brightness(&self) -> bool {
        false
    }

    // Accepted and dropped. Nothing in this adapter reports finger down/up.
    fn set_callback(&self, callback: Option<Arc<dyn FingerprintInscreenCallback>>) {
        debug!("setCallback (present: {}), ignored", callback.is_some());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::MapProperties;
    use crate::testing::{LockEvent, RecordingVendor, RecordingWakeLock, TempDir};
    use std::fs;

    struct Fixture {
        dir: TempDir,
        vendor: RecordingVendor,
        lock: RecordingWakeLock,
        controller: FodController<RecordingVendor, MapProperties, RecordingWakeLock>,
    }

    fn fixture(props: MapProperties) -> Fixture {
        let dir = TempDir::new("inscreen");
        let mut config = FodConfig::default();
        config.display.disp_param_path = dir.path().join("disp_param");
        config.display.fod_status_path = dir.path().join("fod_status");

        let vendor = RecordingVendor::default();
        let lock = RecordingWakeLock::default();
        let controller = FodController::with_parts(config, vendor.clone(), props, lock.clone());
        Fixture { dir, vendor, lock, controller }
    }

    fn read(dir: &TempDir, node: &str) -> String {
        fs::read_to_string(dir.path().join(node)).unwrap()
    }

    #[test]
    fn test_geometry_from_properties() {
        let sensor = FodConfig::default().sensor;
        let f = fixture(
            MapProperties::new()
                .with(sensor.offset_prop, "100,200")
                .with(sensor.size_prop, "050,080"),
        );

        assert_eq!(f.controller.get_position_x(), 100);
        assert_eq!(f.controller.get_position_y(), 200);
        assert_eq!(f.controller.get_size(), 80);
    }

    #[test]
    fn test_geometry_defaults() {
        let sensor = FodConfig::default().sensor;
        let f = fixture(
            MapProperties::new()
                .with(sensor.offset_prop, "0,0")
                .with(sensor.size_prop, "50,80"),
        );

        assert_eq!(f.controller.get_position_x(), 455);
        assert_eq!(f.controller.get_position_y(), 1910);
        assert_eq!(f.controller.get_size(), 190);
    }

    #[test]
    fn test_switch_hbm_writes_disp_param() {
        let f = fixture(MapProperties::new());

        f.controller.switch_hbm(true);
        assert_eq!(read(&f.dir, "disp_param"), "0x20000");
        f.controller.switch_hbm(false);
        assert_eq!(read(&f.dir, "disp_param"), "0xE0000");
    }

    #[test]
    fn test_fod_view_writes_status() {
        let f = fixture(MapProperties::new());

        f.controller.on_show_fod_view();
        assert_eq!(read(&f.dir, "fod_status"), "1");
        f.controller.on_hide_fod_view();
        assert_eq!(read(&f.dir, "fod_status"), "0");
    }

    #[test]
    fn test_press_release_sequence() {
        let f = fixture(MapProperties::new());

        f.controller.on_press();
        assert!(f.controller.is_pressed());
        f.controller.on_press();
        f.controller.on_release();
        assert!(!f.controller.is_pressed());

        let name = "FingerprintInscreenService".to_string();
        assert_eq!(
            f.lock.events(),
            vec![LockEvent::Acquire(name.clone()), LockEvent::Release(name)]
        );
        assert_eq!(f.vendor.calls(), vec![(10, 1), (10, 1), (10, 0)]);
    }

    #[test]
    fn test_release_wake_lock_without_press() {
        let f = fixture(MapProperties::new());
        assert!(!f.controller.is_pressed());

        assert!(f.controller.release_wake_lock());
        f.controller.on_release();

        let name = "FingerprintInscreenService".to_string();
        assert_eq!(f.lock.events(), vec![LockEvent::Release(name)]);
        assert_eq!(f.vendor.calls(), vec![(10, 0)]);
        assert!(!f.controller.is_pressed());
    }

    #[test]
    fn test_handle_error() {
        let f = fixture(MapProperties::new());

        assert!(f.controller.handle_error(8, 6));
        assert!(!f.controller.handle_error(8, 0));
        assert!(!f.controller.handle_error(1, 6));
        assert!(!f.controller.handle_acquired(8, 6));
    }

    #[test]
    fn test_fixed_answers() {
        struct Silent;
        impl FingerprintInscreenCallback for Silent {
            fn on_finger_down(&self) {}
            fn on_finger_up(&self) {}
        }

        let f = fixture(MapProperties::new());
        f.controller.on_start_enroll();
        f.controller.on_finish_enroll();
        f.controller.set_long_press_enabled(true);
        f.controller.set_callback(Some(Arc::new(Silent)));
        f.controller.set_callback(None);

        assert!(!f.controller.should_boost_brightness());
        assert_eq!(f.controller.get_dim_amount(0), 255);
        assert_eq!(f.controller.get_dim_amount(255), 35);
        assert!(f.vendor.calls().is_empty());
        assert!(!f.dir.path().join("fod_status").exists());
    }

    #[test]
    fn test_missing_nodes_do_not_fail() {
        let mut f = fixture(MapProperties::new());
        f.controller.config.display.disp_param_path = f.dir.path().join("gone/disp_param");

        f.controller.switch_hbm(true);
        assert!(!f.dir.path().join("gone").exists());
    }

    #[test]
    fn test_usable_as_trait_object() {
        let f = fixture(MapProperties::new());
        let inscreen: Box<dyn FingerprintInscreen> = Box::new(f.controller);
        assert_eq!(inscreen.get_position_x(), 455);
    }
}
