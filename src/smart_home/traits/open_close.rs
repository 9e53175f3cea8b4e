use crate::domain::{Device, Domain, Features, Number, Params};
use crate::hub::{HubCommand, SwitchCmd};
use crate::smart_home::device_trait::{Attributes, DeviceTrait, TraitError};
use crate::smart_home::identifiers::{COMMAND_OPEN_CLOSE, TRAIT_OPEN_CLOSE};

const DEFAULT_OPEN_PERCENT: Number = Number::PositiveInt(50);

/// Blinds and screens. The hub only knows open, close and stop, so every partial opening
/// stops the motor where it is.
#[derive(Debug, Default)]
pub struct OpenCloseTrait;

impl DeviceTrait for OpenCloseTrait {
    fn name(&self) -> &'static str {
        TRAIT_OPEN_CLOSE
    }

    fn commands(&self) -> &'static [&'static str] {
        &[COMMAND_OPEN_CLOSE]
    }

    fn supported(&self, domain: Domain, _features: Features) -> bool {
        matches!(domain, Domain::Blinds | Domain::Screen)
    }

    fn query_attributes(&self, _device: &Device) -> Attributes {
        Attributes::new()
    }

    fn translate(&self, device: &Device, command: &str, params: &Params) -> Result<HubCommand, TraitError> {
        if command != COMMAND_OPEN_CLOSE {
            return Err(TraitError::unsupported(self.name(), command));
        }

        let open_percent = params
            .optional_number("openPercent")
            .map_err(TraitError::parameter(command))?
            .unwrap_or(DEFAULT_OPEN_PERCENT);

        // Blinds are switched "off" to open them
        let switch_cmd = if open_percent == Number::PositiveInt(100) {
            SwitchCmd::Off
        } else if open_percent == Number::PositiveInt(0) {
            SwitchCmd::On
        } else {
            SwitchCmd::Stop
        };

        Ok(HubCommand::switch_light(&device.id, switch_cmd))
    }
}
