//! Power supply access
//!
//! Detects the battery in the kernel power-supply class and reads its
//! `capacity` attribute on demand.

use crate::{BatteryLevel, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Where the kernel exposes power supplies
pub const DEFAULT_POWER_SUPPLY_ROOT: &str = "/sys/class/power_supply";

#[derive(Debug, Error)]
pub enum PowerError {
    #[error("No battery power supply found")]
    NotFound,

    #[error("Invalid value {value:?} in {}", .path.display())]
    InvalidAttribute { path: PathBuf, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Source of battery capacity readings.
///
/// `None` means the OS could not supply a reading: no battery, no driver,
/// permission denied or a value outside `0..=100`.
pub trait BatteryLevelProvider {
    fn battery_level(&self) -> Option<BatteryLevel>;
}

impl<T: BatteryLevelProvider + ?Sized> BatteryLevelProvider for Arc<T> {
    fn battery_level(&self) -> Option<BatteryLevel> {
        (**self).battery_level()
    }
}

impl<T: BatteryLevelProvider + ?Sized> BatteryLevelProvider for Box<T> {
    fn battery_level(&self) -> Option<BatteryLevel> {
        (**self).battery_level()
    }
}

/// Battery charging status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryStatus {
    Charging,
    Discharging,
    Full,
    NotCharging,
    Unknown,
}

impl BatteryStatus {
    /// Parse the sysfs `status` attribute
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "Charging" => BatteryStatus::Charging,
            "Discharging" => BatteryStatus::Discharging,
            "Full" => BatteryStatus::Full,
            "Not charging" => BatteryStatus::NotCharging,
            _ => BatteryStatus::Unknown,
        }
    }

    /// Get sysfs name
    pub fn as_str(&self) -> &'static str {
        match self {
            BatteryStatus::Charging => "Charging",
            BatteryStatus::Discharging => "Discharging",
            BatteryStatus::Full => "Full",
            BatteryStatus::NotCharging => "Not charging",
            BatteryStatus::Unknown => "Unknown",
        }
    }
}

/// Battery backed by a power-supply directory in sysfs
#[derive(Debug, Clone)]
pub struct PowerSupply {
    root: PathBuf,
    battery_path: Option<PathBuf>,
}

impl PowerSupply {
    /// Detect the battery under the default power-supply root
    pub fn detect() -> Self {
        Self::with_root(DEFAULT_POWER_SUPPLY_ROOT)
    }

    /// Detect the battery under a custom power-supply root.
    ///
    /// A missing root or a root without a battery still yields a provider;
    /// it simply reports no level.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let battery_path = match Self::find_battery(&root) {
            Ok(path) => {
                tracing::info!("Found battery at {}", path.display());
                Some(path)
            }
            Err(PowerError::NotFound) => {
                tracing::info!("No battery under {}", root.display());
                None
            }
            Err(e) => {
                tracing::warn!("Failed to scan {}: {}", root.display(), e);
                None
            }
        };

        Self { root, battery_path }
    }

    /// Use a known battery directory without scanning
    pub fn at_path(battery_path: impl Into<PathBuf>) -> Self {
        let battery_path = battery_path.into();
        let root = battery_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_POWER_SUPPLY_ROOT));

        Self {
            root,
            battery_path: Some(battery_path),
        }
    }

    /// Find the first supply whose `type` is `Battery`.
    ///
    /// Entries are visited in name order so `BAT0` wins over `BAT1`.
    pub fn find_battery(root: &Path) -> Result<PathBuf> {
        if !root.exists() {
            return Err(PowerError::NotFound);
        }

        let mut entries = fs::read_dir(root)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .collect::<Vec<_>>();
        entries.sort();

        for path in entries {
            if let Ok(psu_type) = fs::read_to_string(path.join("type")) {
                if psu_type.trim().eq_ignore_ascii_case("battery") {
                    return Ok(path);
                }
            }
        }

        Err(PowerError::NotFound)
    }

    /// Power-supply root this provider scanned
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Detected battery directory, if any
    pub fn battery_path(&self) -> Option<&Path> {
        self.battery_path.as_deref()
    }

    /// Read the raw `capacity` attribute
    pub fn read_capacity(&self) -> Result<i64> {
        let battery_path = self.battery_path.as_ref().ok_or(PowerError::NotFound)?;
        read_sysfs_int(&battery_path.join("capacity"))
    }

    /// Read the charging status, `Unknown` when unavailable
    pub fn status(&self) -> BatteryStatus {
        self.battery_path
            .as_ref()
            .and_then(|path| fs::read_to_string(path.join("status")).ok())
            .map(|s| BatteryStatus::parse(&s))
            .unwrap_or(BatteryStatus::Unknown)
    }
}

impl BatteryLevelProvider for PowerSupply {
    fn battery_level(&self) -> Option<BatteryLevel> {
        let raw = match self.read_capacity() {
            Ok(raw) => raw,
            Err(PowerError::NotFound) => return None,
            Err(e) => {
                tracing::warn!("Failed to read battery capacity: {}", e);
                return None;
            }
        };

        let level = BatteryLevel::new(raw);
        if level.is_none() {
            tracing::warn!("Battery capacity out of range: {}", raw);
        }
        level
    }
}

/// Read integer from sysfs file
fn read_sysfs_int(path: &Path) -> Result<i64> {
    let contents = fs::read_to_string(path)?;
    contents
        .trim()
        .parse()
        .map_err(|_| PowerError::InvalidAttribute {
            path: path.to_path_buf(),
            value: contents.trim().to_string(),
        })
}
