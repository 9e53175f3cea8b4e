//! Identifiers defined by the assistant's smart home protocol.

use crate::domain::Domain;

pub const TRAIT_ON_OFF: &str = "action.devices.traits.OnOff";
pub const TRAIT_BRIGHTNESS: &str = "action.devices.traits.Brightness";
pub const TRAIT_SCENE: &str = "action.devices.traits.Scene";
pub const TRAIT_OPEN_CLOSE: &str = "action.devices.traits.OpenClose";
pub const TRAIT_TEMPERATURE_SETTING: &str = "action.devices.traits.TemperatureSetting";
pub const TRAIT_LOCK_UNLOCK: &str = "action.devices.traits.LockUnlock";

pub const COMMAND_ON_OFF: &str = "action.devices.commands.OnOff";
pub const COMMAND_BRIGHTNESS_ABSOLUTE: &str = "action.devices.commands.BrightnessAbsolute";
pub const COMMAND_ACTIVATE_SCENE: &str = "action.devices.commands.ActivateScene";
pub const COMMAND_OPEN_CLOSE: &str = "action.devices.commands.OpenClose";
pub const COMMAND_THERMOSTAT_TEMPERATURE_SETPOINT: &str = "action.devices.commands.ThermostatTemperatureSetpoint";
pub const COMMAND_THERMOSTAT_SET_MODE: &str = "action.devices.commands.ThermostatSetMode";
pub const COMMAND_LOCK_UNLOCK: &str = "action.devices.commands.LockUnlock";

pub const INTENT_SYNC: &str = "action.devices.SYNC";
pub const INTENT_QUERY: &str = "action.devices.QUERY";
pub const INTENT_EXECUTE: &str = "action.devices.EXECUTE";
pub const INTENT_DISCONNECT: &str = "action.devices.DISCONNECT";

/// The device type reported in a SYNC response.
pub fn device_type(domain: Domain) -> &'static str {
    match domain {
        Domain::Group | Domain::Switch => "action.devices.types.SWITCH",
        Domain::Scene => "action.devices.types.SCENE",
        Domain::Light => "action.devices.types.LIGHT",
        Domain::Blinds => "action.devices.types.BLINDS",
        Domain::Screen => "action.devices.types.SHUTTER",
        Domain::Climate | Domain::Temperature => "action.devices.types.THERMOSTAT",
        Domain::Lock => "action.devices.types.LOCK",
    }
}
