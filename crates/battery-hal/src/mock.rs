//! Mock battery for testing without a real power supply
//!
//! # Usage
//!
//! ```
//! use battery_hal::{BatteryLevelProvider, MockBattery};
//!
//! let battery = MockBattery::with_level(73);
//! assert_eq!(battery.battery_level().map(|l| l.percent()), Some(73));
//!
//! battery.set_raw(None);
//! assert!(battery.battery_level().is_none());
//! ```

use crate::{BatteryLevel, BatteryLevelProvider};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// Simulated battery with a settable raw reading.
///
/// Clones share state, so a test can keep one handle while the channel
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct MockBattery {
    raw: Arc<RwLock<Option<i64>>>,
    queries: Arc<AtomicUsize>,
}

impl MockBattery {
    /// Battery reporting the given raw capacity
    pub fn with_level(raw: i64) -> Self {
        let battery = Self::default();
        battery.set_raw(Some(raw));
        battery
    }

    /// Device without a battery
    pub fn absent() -> Self {
        Self::default()
    }

    /// Change the raw OS reading. `None` simulates a missing facility.
    pub fn set_raw(&self, raw: Option<i64>) {
        if let Ok(mut guard) = self.raw.write() {
            *guard = raw;
        }
    }

    /// How many times the battery has been queried
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl BatteryLevelProvider for MockBattery {
    fn battery_level(&self) -> Option<BatteryLevel> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let raw = self.raw.read().ok().and_then(|guard| *guard)?;
        BatteryLevel::new(raw)
    }
}
