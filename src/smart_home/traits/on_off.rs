use crate::domain::{Device, Domain, Features, Params};
use crate::hub::{HubCommand, SwitchCmd};
use crate::smart_home::device_trait::{Attributes, DeviceTrait, TraitError};
use crate::smart_home::identifiers::{COMMAND_ON_OFF, TRAIT_ON_OFF};
use serde_json::Value;

/// Basic on and off switching. Groups are switched as a scene on the hub, everything else as
/// a light switch.
#[derive(Debug, Default)]
pub struct OnOffTrait;

impl DeviceTrait for OnOffTrait {
    fn name(&self) -> &'static str {
        TRAIT_ON_OFF
    }

    fn commands(&self) -> &'static [&'static str] {
        &[COMMAND_ON_OFF]
    }

    fn supported(&self, domain: Domain, _features: Features) -> bool {
        matches!(domain, Domain::Group | Domain::Switch | Domain::Light)
    }

    fn query_attributes(&self, device: &Device) -> Attributes {
        let mut attributes = Attributes::new();
        if let Some(state) = device.state.state() {
            attributes.insert("on".to_string(), Value::Bool(state != "Off"));
        }
        attributes
    }

    fn translate(&self, device: &Device, command: &str, params: &Params) -> Result<HubCommand, TraitError> {
        if command != COMMAND_ON_OFF {
            return Err(TraitError::unsupported(self.name(), command));
        }

        let switch_cmd = SwitchCmd::from_bool(params.bool("on").map_err(TraitError::parameter(command))?);
        match device.domain {
            Domain::Group => Ok(HubCommand::switch_scene(&device.id, switch_cmd)),
            _ => Ok(HubCommand::switch_light(&device.id, switch_cmd)),
        }
    }
}
