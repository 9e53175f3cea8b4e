use crate::domain::{Device, Domain, Features, Params};
use crate::hub::{HubCommand, SwitchCmd};
use crate::smart_home::device_trait::{Attributes, DeviceTrait, TraitError};
use crate::smart_home::identifiers::{COMMAND_BRIGHTNESS_ABSOLUTE, TRAIT_BRIGHTNESS};

#[derive(Debug, Default)]
pub struct BrightnessTrait;

impl DeviceTrait for BrightnessTrait {
    fn name(&self) -> &'static str {
        TRAIT_BRIGHTNESS
    }

    fn commands(&self) -> &'static [&'static str] {
        &[COMMAND_BRIGHTNESS_ABSOLUTE]
    }

    fn supported(&self, domain: Domain, features: Features) -> bool {
        domain == Domain::Light && features.contains(Features::BRIGHTNESS)
    }

    fn query_attributes(&self, device: &Device) -> Attributes {
        let mut attributes = Attributes::new();
        if device.domain == Domain::Light {
            if let Some(level) = device.state.level() {
                attributes.insert("brightness".to_string(), level.into());
            }
        }
        attributes
    }

    fn translate(&self, device: &Device, command: &str, params: &Params) -> Result<HubCommand, TraitError> {
        if command != COMMAND_BRIGHTNESS_ABSOLUTE {
            return Err(TraitError::unsupported(self.name(), command));
        }

        // Passed on unvalidated, the protocol sends 0-100
        let level = params.number("brightness").map_err(TraitError::parameter(command))?;
        Ok(HubCommand::switch_light(&device.id, SwitchCmd::SetLevel).arg("level", level.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DeviceState, Number, ParamValue};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    #[test]
    fn supported_for_lights_with_the_brightness_feature() {
        let features = Features::BRIGHTNESS | Features::THERMOSTAT_SETPOINT;

        assert!(BrightnessTrait.supported(Domain::Light, features));
        assert!(!BrightnessTrait.supported(Domain::Light, features.without(Features::BRIGHTNESS)));
        assert!(!BrightnessTrait.supported(Domain::Switch, features));
    }

    #[test]
    fn query_reports_the_level_verbatim() {
        let device = Device::new("7", "Lamp", Domain::Light)
            .with_features(Features::BRIGHTNESS)
            .with_state(DeviceState::default().with_state("On").with_level(Number::PositiveInt(42)));

        let attributes = BrightnessTrait.query_attributes(&device);

        assert_eq!(Value::Object(attributes), json!({ "brightness": 42 }));
    }

    #[test]
    fn query_omits_brightness_without_a_level() {
        let device = Device::new("7", "Lamp", Domain::Light).with_features(Features::BRIGHTNESS);

        assert!(BrightnessTrait.query_attributes(&device).is_empty());
    }

    #[test]
    fn query_ignores_devices_that_are_not_lights() {
        let device = Device::new("7", "Fan", Domain::Switch).with_state(DeviceState::default().with_level(Number::PositiveInt(42)));

        assert!(BrightnessTrait.query_attributes(&device).is_empty());
    }

    #[test]
    fn translate_sets_the_level() {
        let device = Device::new("7", "Lamp", Domain::Light);
        let params = Params::new().with("brightness", ParamValue::Number(Number::PositiveInt(65)));

        let command = BrightnessTrait.translate(&device, COMMAND_BRIGHTNESS_ABSOLUTE, &params).unwrap();

        assert_eq!(command, HubCommand::switch_light("7", SwitchCmd::SetLevel).arg("level", "65"));
    }

    #[test]
    fn translate_rejects_a_non_numeric_brightness() {
        let device = Device::new("7", "Lamp", Domain::Light);
        let params = Params::new().with("brightness", ParamValue::Text("bright".to_string()));

        let result = BrightnessTrait.translate(&device, COMMAND_BRIGHTNESS_ABSOLUTE, &params);

        assert!(matches!(result, Err(TraitError::InvalidParameter { name: "brightness", .. })));
    }

    #[test]
    fn translate_fails_without_the_brightness_parameter() {
        let device = Device::new("7", "Lamp", Domain::Light);

        let result = BrightnessTrait.translate(&device, COMMAND_BRIGHTNESS_ABSOLUTE, &Params::new());

        assert_eq!(
            result,
            Err(TraitError::MissingParameter {
                command: COMMAND_BRIGHTNESS_ABSOLUTE.to_string(),
                name: "brightness"
            })
        );
    }
}
