pub mod device;
mod number;
mod params;
mod temperature_unit;

pub use device::{Device, DeviceState, Domain, Features, SwitchType};
pub use number::Number;
pub use params::{ParamError, ParamValue, Params};
pub use temperature_unit::TemperatureUnit;
