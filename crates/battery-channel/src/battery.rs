//! Battery level handler
//!
//! Answers `getBatteryLevel` with the current capacity, or `UNAVAILABLE`
//! when the OS has no reading. Everything else is not implemented.

use crate::{MethodCall, MethodCallHandler, MethodResponse};
use battery_hal::BatteryLevelProvider;

/// Default channel name shared with the application shell
pub const BATTERY_CHANNEL: &str = "io.flutterengineering.battery/methods";

/// The only supported method
pub const GET_BATTERY_LEVEL: &str = "getBatteryLevel";

/// Error code when no reading is available
pub const UNAVAILABLE: &str = "UNAVAILABLE";

pub const UNAVAILABLE_MESSAGE: &str = "Battery level not available.";

/// Dispatches battery method calls to a provider
#[derive(Debug, Clone)]
pub struct BatteryLevelHandler<P> {
    provider: P,
}

impl<P: BatteryLevelProvider> BatteryLevelHandler<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn get_battery_level(&self) -> MethodResponse {
        match self.provider.battery_level() {
            Some(level) => MethodResponse::success(level),
            None => MethodResponse::error(UNAVAILABLE, UNAVAILABLE_MESSAGE),
        }
    }
}

impl<P: BatteryLevelProvider> MethodCallHandler for BatteryLevelHandler<P> {
    fn on_method_call(&self, call: &MethodCall) -> MethodResponse {
        match call.method.as_str() {
            GET_BATTERY_LEVEL => self.get_battery_level(),
            _ => MethodResponse::NotImplemented,
        }
    }
}
