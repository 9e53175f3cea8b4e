use crate::domain::Number;
use serde::Deserialize;
use std::fmt::{Display, Formatter};
use std::ops::BitOr;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Device {
    pub id: String,
    pub name: String,
    pub domain: Domain,
    #[serde(default)]
    pub features: Features,
    #[serde(default)]
    pub state: DeviceState,
}

#[cfg(test)]
impl Device {
    pub fn new(id: impl Into<String>, name: impl Into<String>, domain: Domain) -> Self {
        Device {
            id: id.into(),
            name: name.into(),
            domain,
            features: Features::NONE,
            state: DeviceState::default(),
        }
    }

    pub fn with_features(mut self, features: Features) -> Self {
        self.features = features;
        self
    }

    pub fn with_state(mut self, state: DeviceState) -> Self {
        self.state = state;
        self
    }
}

/// The hub-side device category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Domain {
    Group,
    Scene,
    Light,
    Switch,
    Blinds,
    Screen,
    Climate,
    Temperature,
    Lock,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Group => "group",
            Domain::Scene => "scene",
            Domain::Light => "light",
            Domain::Switch => "switch",
            Domain::Blinds => "blinds",
            Domain::Screen => "screen",
            Domain::Climate => "climate",
            Domain::Temperature => "temperature",
            Domain::Lock => "lock",
        }
    }
}

impl Display for Domain {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional hardware capabilities of a device, beyond what its domain implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(transparent)]
pub struct Features(u32);

impl Features {
    pub const NONE: Features = Features(0);
    pub const BRIGHTNESS: Features = Features(1);
    pub const THERMOSTAT_SETPOINT: Features = Features(1 << 1);

    pub const fn contains(&self, other: Features) -> bool {
        self.0 & other.0 == other.0
    }
}

#[cfg(test)]
impl Features {
    pub const fn from_bits(bits: u32) -> Self {
        Features(bits)
    }

    pub const fn without(self, other: Features) -> Self {
        Features(self.0 & !other.0)
    }
}

impl BitOr for Features {
    type Output = Features;

    fn bitor(self, rhs: Self) -> Self::Output {
        Features(self.0 | rhs.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub enum SwitchType {
    #[serde(rename = "Door Lock")]
    DoorLock,
    #[serde(rename = "Door Lock Inverted")]
    DoorLockInverted,
    #[default]
    #[serde(other)]
    Other,
}

/// Live device state as last reported by the hub. Every field is optional: the hub only
/// reports the values that make sense for the device's domain.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceState {
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    level: Option<Number>,
    #[serde(default)]
    temp: Option<f64>,
    #[serde(default)]
    setpoint: Option<f64>,
    #[serde(default)]
    humidity: Option<f64>,
    #[serde(default)]
    switch_type: SwitchType,
}

impl DeviceState {
    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    pub fn level(&self) -> Option<Number> {
        self.level
    }

    pub fn temp(&self) -> Option<f64> {
        self.temp
    }

    pub fn setpoint(&self) -> Option<f64> {
        self.setpoint
    }

    pub fn humidity(&self) -> Option<f64> {
        self.humidity
    }

    pub fn switch_type(&self) -> &SwitchType {
        &self.switch_type
    }
}

#[cfg(test)]
impl DeviceState {
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn with_level(mut self, level: Number) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_temp(mut self, temp: f64) -> Self {
        self.temp = Some(temp);
        self
    }

    pub fn with_setpoint(mut self, setpoint: f64) -> Self {
        self.setpoint = Some(setpoint);
        self
    }

    pub fn with_humidity(mut self, humidity: f64) -> Self {
        self.humidity = Some(humidity);
        self
    }

    pub fn with_switch_type(mut self, switch_type: SwitchType) -> Self {
        self.switch_type = switch_type;
        self
    }
}
