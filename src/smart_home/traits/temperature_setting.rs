use crate::domain::{Device, Domain, Features, Number, Params, TemperatureUnit};
use crate::hub::{HubCommand, SET_SETPOINT};
use crate::smart_home::device_trait::{Attributes, DeviceTrait, TraitError};
use crate::smart_home::identifiers::{COMMAND_THERMOSTAT_SET_MODE, COMMAND_THERMOSTAT_TEMPERATURE_SETPOINT, TRAIT_TEMPERATURE_SETTING};
use serde_json::Value;
use tracing::debug;

const AVAILABLE_THERMOSTAT_MODES: &str = "off,heat,cool,on";

/// Thermostats with a setpoint and plain temperature sensors. Sensors are reported as
/// thermostats that are switched off.
#[derive(Debug, Default)]
pub struct TemperatureSettingTrait {
    unit: TemperatureUnit,
}

impl TemperatureSettingTrait {
    pub fn new(unit: TemperatureUnit) -> Self {
        TemperatureSettingTrait { unit }
    }

    fn insert_temperature(&self, attributes: &mut Attributes, key: &str, value: Option<f64>) {
        if let Some(value) = value {
            attributes.insert(key.to_string(), Value::from(self.unit.to_celsius(value)));
        }
    }
}

impl DeviceTrait for TemperatureSettingTrait {
    fn name(&self) -> &'static str {
        TRAIT_TEMPERATURE_SETTING
    }

    fn commands(&self) -> &'static [&'static str] {
        &[COMMAND_THERMOSTAT_TEMPERATURE_SETPOINT, COMMAND_THERMOSTAT_SET_MODE]
    }

    fn supported(&self, domain: Domain, features: Features) -> bool {
        match domain {
            Domain::Climate => features.contains(Features::THERMOSTAT_SETPOINT),
            Domain::Temperature => true,
            _ => false,
        }
    }

    fn sync_attributes(&self) -> Attributes {
        let mut attributes = Attributes::new();
        attributes.insert("availableThermostatModes".to_string(), Value::from(AVAILABLE_THERMOSTAT_MODES));
        attributes.insert("thermostatTemperatureUnit".to_string(), Value::from(self.unit.code()));
        attributes
    }

    fn query_attributes(&self, device: &Device) -> Attributes {
        let mut attributes = Attributes::new();
        let state = &device.state;

        match device.domain {
            Domain::Temperature => {
                attributes.insert("thermostatMode".to_string(), Value::from("off"));
                self.insert_temperature(&mut attributes, "thermostatTemperatureAmbient", state.temp());
                if let Some(humidity) = state.humidity() {
                    attributes.insert("thermostatHumidityAmbient".to_string(), Value::from(humidity));
                }
            }
            Domain::Climate => {
                attributes.insert("thermostatMode".to_string(), Value::from("heat"));
                let ambient = state.state().and_then(|s| {
                    s.trim()
                        .parse::<f64>()
                        .inspect_err(|_| debug!(device_id = device.id, "Ignoring non-numeric thermostat state '{}'", s))
                        .ok()
                });
                self.insert_temperature(&mut attributes, "thermostatTemperatureAmbient", ambient);
                self.insert_temperature(&mut attributes, "thermostatTemperatureSetpoint", state.setpoint());
            }
            _ => {}
        }

        attributes
    }

    fn translate(&self, device: &Device, command: &str, params: &Params) -> Result<HubCommand, TraitError> {
        match command {
            COMMAND_THERMOSTAT_TEMPERATURE_SETPOINT => {
                let setpoint = params
                    .number("thermostatTemperatureSetpoint")
                    .map_err(TraitError::parameter(command))?;
                let setpoint = match self.unit {
                    TemperatureUnit::Celsius => setpoint,
                    unit => Number::Float(unit.from_celsius(setpoint.as_f64())),
                };
                Ok(HubCommand::new(SET_SETPOINT, &device.id).arg("setpoint", setpoint.to_string()))
            }
            // The hub has no thermostat modes to switch between
            _ => Err(TraitError::unsupported(self.name(), command)),
        }
    }
}
