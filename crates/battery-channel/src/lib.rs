//! Battery method channel
//!
//! Exposes the battery level to an application shell through one named
//! method channel. The shell sends a [`MethodCall`]; the registered
//! [`MethodCallHandler`] answers with exactly one [`MethodResponse`].
//!
//! # Example
//!
//! ```
//! use battery_channel::{BatteryLevelHandler, MethodCall, MethodChannel, MethodResponse};
//! use battery_hal::MockBattery;
//!
//! let mut channel = MethodChannel::new(battery_channel::BATTERY_CHANNEL);
//! channel.set_method_call_handler(BatteryLevelHandler::new(MockBattery::with_level(73)));
//!
//! let response = channel.invoke(&MethodCall::new("getBatteryLevel"));
//! assert_eq!(response, MethodResponse::success(73));
//! ```

pub mod battery;
pub mod channel;
pub mod codec;
pub mod method;

pub use battery::{
    BATTERY_CHANNEL, BatteryLevelHandler, GET_BATTERY_LEVEL, UNAVAILABLE, UNAVAILABLE_MESSAGE,
};
pub use channel::{MethodCallHandler, MethodChannel};
pub use codec::{CodecError, JsonMethodCodec};
pub use method::{MethodCall, MethodResponse, SERIALIZATION_FAILED};
