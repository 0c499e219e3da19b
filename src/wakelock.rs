//! Partial wake lock held between finger press and release
//!
//! The kernel wakelock interface is a pair of write-only nodes: writing a name
//! to `wake_lock` takes the lock, writing it to `wake_unlock` drops it. This is
//! what `acquire_wake_lock(PARTIAL_WAKE_LOCK, ...)` does underneath.

use crate::config::WakeLockConfig;
use crate::{sysfs, Error, Result};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, warn};

/// A named, process-scoped wake lock primitive
pub trait WakeLock: Send + Sync {
    fn acquire(&self, name: &str) -> Result<()>;
    fn release(&self, name: &str) -> Result<()>;
}

/// Kernel wakelock nodes under /sys/power
#[derive(Debug, Clone)]
pub struct SysfsWakeLock {
    lock_path: PathBuf,
    unlock_path: PathBuf,
}

impl SysfsWakeLock {
    pub fn new(lock_path: impl Into<PathBuf>, unlock_path: impl Into<PathBuf>) -> Self {
        Self {
            lock_path: lock_path.into(),
            unlock_path: unlock_path.into(),
        }
    }

    pub fn from_config(config: &WakeLockConfig) -> Self {
        Self::new(config.lock_path.clone(), config.unlock_path.clone())
    }
}

impl WakeLock for SysfsWakeLock {
    fn acquire(&self, name: &str) -> Result<()> {
        sysfs::write_value(&self.lock_path, name)
            .map_err(|e| Error::WakeLock(format!("acquire {}: {}", name, e)))
    }

    fn release(&self, name: &str) -> Result<()> {
        sysfs::write_value(&self.unlock_path, name)
            .map_err(|e| Error::WakeLock(format!("release {}: {}", name, e)))
    }
}

/// Idempotent wrapper around a [`WakeLock`]
///
/// The kernel primitive is not reference counted, so a doubled press or a
/// release without a press must not reach it. The held flag is only updated
/// when the underlying call succeeds.
pub struct WakeLockGuard<W> {
    lock: W,
    name: String,
    held: Mutex<bool>,
}

impl<W: WakeLock> WakeLockGuard<W> {
    pub fn new(lock: W, name: impl Into<String>) -> Self {
        Self {
            lock,
            name: name.into(),
            held: Mutex::new(false),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_held(&self) -> bool {
        *self.held.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Take the lock. Returns true if this call acquired it.
    pub fn acquire(&self) -> bool {
        let mut held = self.held.lock().unwrap_or_else(|e| e.into_inner());
        if *held {
            debug!("Wake lock {} already held", self.name);
            return false;
        }
        match self.lock.acquire(&self.name) {
            Ok(()) => {
                *held = true;
                true
            }
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }

    /// Drop the lock. Returns true if this call released it.
    pub fn release(&self) -> bool {
        let mut held = self.held.lock().unwrap_or_else(|e| e.into_inner());
        if !*held {
            debug!("Wake lock {} not held, nothing to release", self.name);
            return false;
        }
        match self.lock.release(&self.name) {
            Ok(()) => {
                *held = false;
                true
            }
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }

    /// Release whether or not this guard took the lock. Used to clear a lock
    /// left behind by another process. Returns true if the release went through.
    pub fn force_release(&self) -> bool {
        let mut held = self.held.lock().unwrap_or_else(|e| e.into_inner());
        match self.lock.release(&self.name) {
            Ok(()) => {
                *held = false;
                true
            }
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{LockEvent, RecordingWakeLock, TempDir};

    #[test]
    fn test_guard_pairs_acquire_and_release() {
        let lock = RecordingWakeLock::default();
        let guard = WakeLockGuard::new(lock.clone(), "fod");

        assert!(guard.acquire());
        assert!(guard.is_held());
        assert!(guard.release());
        assert!(!guard.is_held());

        assert_eq!(
            lock.events(),
            vec![LockEvent::Acquire("fod".into()), LockEvent::Release("fod".into())]
        );
    }

    #[test]
    fn test_guard_ignores_double_acquire_and_stray_release() {
        let lock = RecordingWakeLock::default();
        let guard = WakeLockGuard::new(lock.clone(), "fod");

        assert!(!guard.release());
        assert!(guard.acquire());
        assert!(!guard.acquire());
        assert!(guard.release());
        assert!(!guard.release());

        assert_eq!(lock.events().len(), 2);
    }

    #[test]
    fn test_concurrent_presses_acquire_once() {
        let lock = RecordingWakeLock::default();
        let guard = std::sync::Arc::new(WakeLockGuard::new(lock.clone(), "fod"));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let guard = guard.clone();
                std::thread::spawn(move || guard.acquire())
            })
            .collect();
        let acquired = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&won| won)
            .count();
        assert_eq!(acquired, 1);

        assert_eq!(lock.events(), vec![LockEvent::Acquire("fod".into())]);
    }

    #[test]
    fn test_sysfs_wake_lock_writes_name() {
        let dir = TempDir::new("wakelock");
        let lock = SysfsWakeLock::new(dir.path().join("wake_lock"), dir.path().join("wake_unlock"));
        let guard = WakeLockGuard::new(lock, "FingerprintInscreenService");

        assert!(guard.acquire());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("wake_lock")).unwrap(),
            "FingerprintInscreenService"
        );
        assert!(guard.release());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("wake_unlock")).unwrap(),
            "FingerprintInscreenService"
        );
    }

    #[test]
    fn test_failed_acquire_is_not_held() {
        let dir = TempDir::new("wakelock");
        let lock = SysfsWakeLock::new(
            dir.path().join("missing/wake_lock"),
            dir.path().join("missing/wake_unlock"),
        );
        let guard = WakeLockGuard::new(lock, "fod");

        assert!(!guard.acquire());
        assert!(!guard.is_held());
        assert!(!guard.release());
    }

    #[test]
    fn test_force_release_writes_unlock_without_prior_acquire() {
        let dir = TempDir::new("wakelock");
        let lock = SysfsWakeLock::new(dir.path().join("wake_lock"), dir.path().join("wake_unlock"));
        let guard = WakeLockGuard::new(lock, "FingerprintInscreenService");

        assert!(!guard.is_held());
        assert!(guard.force_release());
        assert!(!guard.is_held());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("wake_unlock")).unwrap(),
            "FingerprintInscreenService"
        );
        assert!(!dir.path().join("wake_lock").exists());
    }

    #[test]
    fn test_force_release_clears_held_flag() {
        let dir = TempDir::new("wakelock");
        let lock = SysfsWakeLock::new(dir.path().join("wake_lock"), dir.path().join("wake_unlock"));
        let guard = WakeLockGuard::new(lock, "fod");

        assert!(guard.acquire());
        assert!(guard.force_release());
        assert!(!guard.is_held());
        assert!(guard.acquire());
    }
}
