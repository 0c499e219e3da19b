//! Shared fakes for unit tests

use crate::vendor::VendorFingerprint;
use crate::wakelock::WakeLock;
use crate::Result;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

static DIR_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Scratch directory removed on drop
pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub fn new(label: &str) -> Self {
        let n = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "fod-inscreen-{}-{}-{}",
            label,
            std::process::id(),
            n
        ));
        std::fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// Vendor service that records every extCmd
#[derive(Clone, Default)]
pub struct RecordingVendor {
    pub calls: Arc<Mutex<Vec<(i32, i32)>>>,
}

impl RecordingVendor {
    pub fn calls(&self) -> Vec<(i32, i32)> {
        self.calls.lock().unwrap().clone()
    }
}

impl VendorFingerprint for RecordingVendor {
    fn ext_cmd(&self, command: i32, param: i32) -> i32 {
        self.calls.lock().unwrap().push((command, param));
        0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockEvent {
    Acquire(String),
    Release(String),
}

/// Wake lock that records acquire/release order
#[derive(Clone, Default)]
pub struct RecordingWakeLock {
    pub events: Arc<Mutex<Vec<LockEvent>>>,
}

impl RecordingWakeLock {
    pub fn events(&self) -> Vec<LockEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl WakeLock for RecordingWakeLock {
    fn acquire(&self, name: &str) -> Result<()> {
        self.events.lock().unwrap().push(LockEvent::Acquire(name.to_string()));
        Ok(())
    }

    fn release(&self, name: &str) -> Result<()> {
        self.events.lock().unwrap().push(LockEvent::Release(name.to_string()));
        Ok(())
    }
}
