//! Battery level value type

use serde::{Deserialize, Serialize};
use std::fmt;

/// Remaining charge as a whole percentage, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct BatteryLevel(u8);

impl BatteryLevel {
    pub const MIN: BatteryLevel = BatteryLevel(0);
    pub const MAX: BatteryLevel = BatteryLevel(100);

    /// Build a level from a raw OS reading.
    ///
    /// Returns `None` for anything outside `0..=100`. This also covers the
    /// `i32::MIN` sentinel Android reports for an unsupported property.
    pub fn new(raw: i64) -> Option<Self> {
        if (0..=100).contains(&raw) {
            Some(Self(raw as u8))
        } else {
            None
        }
    }

    /// Percentage value
    pub fn percent(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for BatteryLevel {
    type Error = String;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or_else(|| format!("battery level out of range: {}", raw))
    }
}

impl From<BatteryLevel> for u8 {
    fn from(level: BatteryLevel) -> Self {
        level.0
    }
}

impl From<BatteryLevel> for i64 {
    fn from(level: BatteryLevel) -> Self {
        i64::from(level.0)
    }
}

impl fmt::Display for BatteryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
