use crate::domain::{Device, Domain, Features, Params, TemperatureUnit};
use crate::hub::{HubCommand, HubError, HubTransport};
use crate::smart_home::device_trait::{Attributes, DeviceTrait, TraitError};
use crate::smart_home::traits::{BrightnessTrait, LockUnlockTrait, OnOffTrait, OpenCloseTrait, SceneTrait, TemperatureSettingTrait};
use thiserror::Error;
use tracing::{debug, info, instrument};

/// The traits known to the bridge, in registration order. Built once at startup and read-only
/// afterwards.
#[derive(Debug)]
pub struct TraitRegistry {
    traits: Vec<Box<dyn DeviceTrait>>,
}

impl TraitRegistry {
    pub fn builder() -> TraitRegistryBuilder {
        TraitRegistryBuilder { traits: Vec::new() }
    }

    /// All traits supported by the hub.
    pub fn standard(temperature_unit: TemperatureUnit) -> Result<Self, RegistryError> {
        Ok(TraitRegistry::builder()
            .register(OnOffTrait)?
            .register(SceneTrait)?
            .register(BrightnessTrait)?
            .register(OpenCloseTrait)?
            .register(TemperatureSettingTrait::new(temperature_unit))?
            .register(LockUnlockTrait)?
            .build())
    }

    pub fn len(&self) -> usize {
        self.traits.len()
    }

    pub fn supported_traits(&self, domain: Domain, features: Features) -> impl Iterator<Item = &dyn DeviceTrait> {
        self.traits
            .iter()
            .map(|t| t.as_ref())
            .filter(move |t| t.supported(domain, features))
    }

    pub fn trait_names(&self, device: &Device) -> Vec<&'static str> {
        self.supported_traits(device.domain, device.features).map(|t| t.name()).collect()
    }

    /// Merged SYNC attributes of every trait supported by `device`.
    pub fn sync(&self, device: &Device) -> Attributes {
        let mut attributes = Attributes::new();
        for device_trait in self.supported_traits(device.domain, device.features) {
            attributes.extend(device_trait.sync_attributes());
        }
        attributes
    }

    /// Merged QUERY attributes of every trait supported by `device`.
    pub fn query(&self, device: &Device) -> Attributes {
        let mut attributes = Attributes::new();
        for device_trait in self.supported_traits(device.domain, device.features) {
            attributes.extend(device_trait.query_attributes(device));
        }
        attributes
    }

    /// The first supported trait that declares `command`.
    pub fn resolve(&self, device: &Device, command: &str, params: &Params) -> Option<&dyn DeviceTrait> {
        self.supported_traits(device.domain, device.features)
            .find(|t| t.can_execute(command, params))
    }

    pub fn translate(&self, device: &Device, command: &str, params: &Params) -> Result<HubCommand, ExecuteError> {
        let device_trait = self.resolve(device, command, params).ok_or_else(|| ExecuteError::UnsupportedCommand {
            device_id: device.id.clone(),
            command: command.to_string(),
        })?;
        debug!(device_id = device.id, "Resolved {} to {}", command, device_trait.name());

        Ok(device_trait.translate(device, command, params)?)
    }

    #[instrument(skip_all, fields(device_id = device.id, command = command))]
    pub async fn execute(&self, transport: &dyn HubTransport, device: &Device, command: &str, params: &Params) -> Result<(), ExecuteError> {
        let hub_command = self.translate(device, command, params)?;
        info!("🟢 Executing {} on '{}'", command, device.name);

        transport.send(&hub_command).await?;
        Ok(())
    }
}

pub struct TraitRegistryBuilder {
    traits: Vec<Box<dyn DeviceTrait>>,
}

impl TraitRegistryBuilder {
    pub fn register(mut self, device_trait: impl DeviceTrait + 'static) -> Result<Self, RegistryError> {
        let name = device_trait.name();
        if self.traits.iter().any(|t| t.name() == name) {
            return Err(RegistryError::DuplicateTrait { name });
        }

        self.traits.push(Box::new(device_trait));
        Ok(self)
    }

    pub fn build(self) -> TraitRegistry {
        TraitRegistry { traits: self.traits }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum RegistryError {
    #[error("trait '{name}' is already registered")]
    DuplicateTrait { name: &'static str },
}

#[derive(Error, Debug)]
pub enum ExecuteError {
    #[error("device '{device_id}' does not support command '{command}'")]
    UnsupportedCommand { device_id: String, command: String },
    #[error(transparent)]
    Trait(#[from] TraitError),
    #[error("hub request failed: {0}")]
    Hub(#[from] HubError),
}

impl ExecuteError {
    /// The error code reported to the assistant.
    pub fn error_code(&self) -> &'static str {
        match self {
            ExecuteError::UnsupportedCommand { .. } | ExecuteError::Trait(TraitError::UnsupportedCommand { .. }) => "functionNotSupported",
            ExecuteError::Trait(_) => "protocolError",
            ExecuteError::Hub(e) if e.is_transient() => "transientError",
            ExecuteError::Hub(_) => "hardError",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DeviceState, Number, ParamValue};
    use crate::hub::SwitchCmd;
    use crate::hub::testing::RecordingTransport;
    use crate::smart_home::identifiers::*;
    use pretty_assertions::assert_eq;
    use reqwest::StatusCode;
    use serde_json::{Value, json};
    use test_log::test;

    fn registry() -> TraitRegistry {
        TraitRegistry::standard(TemperatureUnit::Celsius).unwrap()
    }

    fn dimmable_light() -> Device {
        Device::new("7", "Lamp", Domain::Light)
            .with_features(Features::BRIGHTNESS)
            .with_state(DeviceState::default().with_state("On").with_level(Number::PositiveInt(80)))
    }

    #[test]
    fn registers_every_trait_once_in_order() {
        let registry = registry();

        let names = registry.traits.iter().map(|t| t.name()).collect::<Vec<_>>();

        assert_eq!(
            names,
            vec![
                TRAIT_ON_OFF,
                TRAIT_SCENE,
                TRAIT_BRIGHTNESS,
                TRAIT_OPEN_CLOSE,
                TRAIT_TEMPERATURE_SETTING,
                TRAIT_LOCK_UNLOCK
            ]
        );
    }

    #[test]
    fn rejects_duplicate_traits() {
        let result = TraitRegistry::builder().register(OnOffTrait).unwrap().register(OnOffTrait);

        assert_eq!(result.err(), Some(RegistryError::DuplicateTrait { name: TRAIT_ON_OFF }));
    }

    #[test]
    fn trait_names_follow_the_device_features() {
        let registry = registry();
        let light = dimmable_light();

        assert_eq!(registry.trait_names(&light), vec![TRAIT_ON_OFF, TRAIT_BRIGHTNESS]);
        assert_eq!(
            registry.trait_names(&light.with_features(Features::NONE)),
            vec![TRAIT_ON_OFF]
        );
    }

    #[test]
    fn query_merges_the_attributes_of_all_traits() {
        let attributes = registry().query(&dimmable_light());

        assert_eq!(Value::Object(attributes), json!({ "on": true, "brightness": 80 }));
    }

    #[test]
    fn sync_and_query_are_empty_for_devices_without_traits() {
        let registry = registry();
        let thermostat_without_setpoint = Device::new("9", "Thermostat", Domain::Climate).with_state(DeviceState::default().with_state("20.0"));

        assert!(registry.trait_names(&thermostat_without_setpoint).is_empty());
        assert!(registry.sync(&thermostat_without_setpoint).is_empty());
        assert!(registry.query(&thermostat_without_setpoint).is_empty());
    }

    #[test]
    fn sync_is_a_pure_function_of_the_traits() {
        let registry = registry();
        let sensor = Device::new("4", "Attic", Domain::Temperature);

        assert_eq!(registry.sync(&sensor), registry.sync(&sensor.clone().with_state(DeviceState::default().with_temp(30.0))));
    }

    #[test(tokio::test)]
    async fn execute_sends_the_translated_command() {
        let transport = RecordingTransport::default();
        let params = Params::new().with("brightness", ParamValue::Number(Number::PositiveInt(30)));

        let result = registry()
            .execute(&transport, &dimmable_light(), COMMAND_BRIGHTNESS_ABSOLUTE, &params)
            .await;

        assert!(result.is_ok());
        assert_eq!(
            transport.sent(),
            vec![HubCommand::switch_light("7", SwitchCmd::SetLevel).arg("level", "30")]
        );
    }

    #[test(tokio::test)]
    async fn execute_rejects_unknown_commands_without_calling_the_hub() {
        let transport = RecordingTransport::default();

        let result = registry()
            .execute(&transport, &dimmable_light(), COMMAND_LOCK_UNLOCK, &Params::new().with("lock", ParamValue::Boolean(true)))
            .await;

        assert!(matches!(result, Err(ExecuteError::UnsupportedCommand { .. })));
        assert!(transport.sent().is_empty());
    }

    #[test(tokio::test)]
    async fn execute_rejects_commands_of_unsupported_traits() {
        let transport = RecordingTransport::default();
        let params = Params::new().with("brightness", ParamValue::Number(Number::PositiveInt(30)));

        let result = registry()
            .execute(&transport, &dimmable_light().with_features(Features::NONE), COMMAND_BRIGHTNESS_ABSOLUTE, &params)
            .await;

        assert!(result.is_err_and(|e| e.error_code() == "functionNotSupported"));
        assert!(transport.sent().is_empty());
    }

    #[test(tokio::test)]
    async fn execute_fails_before_calling_the_hub_on_missing_parameters() {
        let transport = RecordingTransport::default();

        let result = registry().execute(&transport, &dimmable_light(), COMMAND_ON_OFF, &Params::new()).await;

        assert!(result.is_err_and(|e| e.error_code() == "protocolError"));
        assert!(transport.sent().is_empty());
    }

    #[test(tokio::test)]
    async fn execute_rejects_thermostat_modes_without_calling_the_hub() {
        let transport = RecordingTransport::default();
        let thermostat = Device::new("9", "Thermostat", Domain::Climate).with_features(Features::THERMOSTAT_SETPOINT);
        let params = Params::new().with("thermostatMode", ParamValue::Text("heat".to_string()));

        let result = registry().execute(&transport, &thermostat, COMMAND_THERMOSTAT_SET_MODE, &params).await;

        assert!(result.is_err_and(|e| e.error_code() == "functionNotSupported"));
        assert!(transport.sent().is_empty());
    }

    #[test(tokio::test)]
    async fn execute_propagates_hub_failures() {
        let transport = RecordingTransport::failing(StatusCode::INTERNAL_SERVER_ERROR);
        let scene = Device::new("3", "Movie night", Domain::Scene);

        let result = registry().execute(&transport, &scene, COMMAND_ACTIVATE_SCENE, &Params::new()).await;

        assert!(matches!(&result, Err(ExecuteError::Hub(HubError::Status { .. }))));
        assert_eq!(result.unwrap_err().error_code(), "transientError");
        assert_eq!(transport.sent().len(), 1);
    }
}
