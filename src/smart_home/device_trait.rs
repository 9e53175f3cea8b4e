use crate::domain::{Device, Domain, Features, ParamError, Params};
use crate::hub::HubCommand;
use std::fmt::Debug;
use thiserror::Error;

/// Protocol attributes contributed by a trait, keyed by their protocol name.
pub type Attributes = serde_json::Map<String, serde_json::Value>;

/// A capability of the assistant protocol (`action.devices.traits.*`) and how it maps onto the
/// hub. Implementations hold no device state, the device is passed into every call.
pub trait DeviceTrait: Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn commands(&self) -> &'static [&'static str];

    /// Whether the trait applies to devices of `domain` with `features`.
    fn supported(&self, domain: Domain, features: Features) -> bool;

    /// Static capability metadata for a SYNC response.
    fn sync_attributes(&self) -> Attributes {
        Attributes::new()
    }

    /// Current state of `device` for a QUERY response. Keys whose value is unknown are left out.
    fn query_attributes(&self, device: &Device) -> Attributes;

    fn can_execute(&self, command: &str, _params: &Params) -> bool {
        self.commands().contains(&command)
    }

    /// Translates `command` into the single hub request that carries it out.
    fn translate(&self, device: &Device, command: &str, params: &Params) -> Result<HubCommand, TraitError>;
}

#[derive(Error, Debug, PartialEq)]
pub enum TraitError {
    #[error("command '{command}' is not supported by {trait_name}")]
    UnsupportedCommand { trait_name: &'static str, command: String },
    #[error("missing parameter '{name}' for command '{command}'")]
    MissingParameter { command: String, name: &'static str },
    #[error("parameter '{name}' for command '{command}' must be a {expected}")]
    InvalidParameter {
        command: String,
        name: &'static str,
        expected: &'static str,
    },
}

impl TraitError {
    pub fn unsupported(trait_name: &'static str, command: &str) -> Self {
        TraitError::UnsupportedCommand {
            trait_name,
            command: command.to_string(),
        }
    }

    pub fn parameter(command: &str) -> impl FnOnce(ParamError) -> TraitError + '_ {
        move |error| match error {
            ParamError::Missing { name } => TraitError::MissingParameter {
                command: command.to_string(),
                name,
            },
            ParamError::InvalidType { name, expected } => TraitError::InvalidParameter {
                command: command.to_string(),
                name,
                expected,
            },
        }
    }
}
