//! Battery Hardware Abstraction Layer
//!
//! Reads the current battery capacity from the kernel power-supply class
//! (`/sys/class/power_supply`), the same attribute Android's
//! `BatteryManager.BATTERY_PROPERTY_CAPACITY` is backed by.
//!
//! Readings are never cached: every call to
//! [`BatteryLevelProvider::battery_level`] goes back to the OS.
//!
//! # Example
//!
//! ```no_run
//! use battery_hal::{BatteryLevelProvider, PowerSupply};
//!
//! let supply = PowerSupply::detect();
//! match supply.battery_level() {
//!     Some(level) => println!("Battery at {}%", level),
//!     None => println!("Battery level not available"),
//! }
//! ```

pub mod level;
pub mod mock;
pub mod power;

pub use level::BatteryLevel;
pub use mock::MockBattery;
pub use power::{
    BatteryLevelProvider, BatteryStatus, DEFAULT_POWER_SUPPLY_ROOT, PowerError, PowerSupply,
};

/// HAL Result type
pub type Result<T> = std::result::Result<T, PowerError>;
