use crate::domain::{Device, Domain, Features, Params, SwitchType};
use crate::hub::{HubCommand, SwitchCmd};
use crate::smart_home::device_trait::{Attributes, DeviceTrait, TraitError};
use crate::smart_home::identifiers::{COMMAND_LOCK_UNLOCK, TRAIT_LOCK_UNLOCK};
use serde_json::Value;
use tracing::debug;

/// Door locks. A lock is switched on to lock it, unless its switch type is inverted.
#[derive(Debug, Default)]
pub struct LockUnlockTrait;

impl LockUnlockTrait {
    fn is_locked(device: &Device) -> Option<bool> {
        let inverted = device.state.switch_type() == &SwitchType::DoorLockInverted;
        match device.state.state()? {
            "Locked" => Some(true),
            "Unlocked" => Some(false),
            "On" => Some(!inverted),
            "Off" => Some(inverted),
            state => {
                debug!(device_id = device.id, "Unknown lock state '{}'", state);
                None
            }
        }
    }
}

impl DeviceTrait for LockUnlockTrait {
    fn name(&self) -> &'static str {
        TRAIT_LOCK_UNLOCK
    }

    fn commands(&self) -> &'static [&'static str] {
        &[COMMAND_LOCK_UNLOCK]
    }

    fn supported(&self, domain: Domain, _features: Features) -> bool {
        domain == Domain::Lock
    }

    fn query_attributes(&self, device: &Device) -> Attributes {
        let mut attributes = Attributes::new();
        if let Some(locked) = Self::is_locked(device) {
            attributes.insert("isLocked".to_string(), Value::Bool(locked));
        }
        attributes
    }

    fn translate(&self, device: &Device, command: &str, params: &Params) -> Result<HubCommand, TraitError> {
        if command != COMMAND_LOCK_UNLOCK {
            return Err(TraitError::unsupported(self.name(), command));
        }

        let lock = params.bool("lock").map_err(TraitError::parameter(command))?;
        let switch_on = match device.state.switch_type() {
            SwitchType::DoorLockInverted => !lock,
            _ => lock,
        };

        // Lock commands are never retried
        Ok(HubCommand::switch_light(&device.id, SwitchCmd::from_bool(switch_on)).non_idempotent())
    }
}
