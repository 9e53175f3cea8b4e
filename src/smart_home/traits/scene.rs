use crate::domain::{Device, Domain, Features, Params};
use crate::hub::{HubCommand, SwitchCmd};
use crate::smart_home::device_trait::{Attributes, DeviceTrait, TraitError};
use crate::smart_home::identifiers::{COMMAND_ACTIVATE_SCENE, TRAIT_SCENE};

/// Scene activation. Scenes on the hub cannot be deactivated, so the scene is not reversible.
#[derive(Debug, Default)]
pub struct SceneTrait;

impl DeviceTrait for SceneTrait {
    fn name(&self) -> &'static str {
        TRAIT_SCENE
    }

    fn commands(&self) -> &'static [&'static str] {
        &[COMMAND_ACTIVATE_SCENE]
    }

    fn supported(&self, domain: Domain, _features: Features) -> bool {
        domain == Domain::Scene
    }

    fn query_attributes(&self, _device: &Device) -> Attributes {
        Attributes::new()
    }

    fn translate(&self, device: &Device, command: &str, _params: &Params) -> Result<HubCommand, TraitError> {
        if command != COMMAND_ACTIVATE_SCENE {
            return Err(TraitError::unsupported(self.name(), command));
        }

        Ok(HubCommand::switch_scene(&device.id, SwitchCmd::On))
    }
}
