use crate::device_snapshot::DeviceSnapshot;
use crate::domain::{Device, Params};
use crate::hub::HubTransport;
use crate::smart_home::device_trait::Attributes;
use crate::smart_home::identifiers::{INTENT_DISCONNECT, INTENT_EXECUTE, INTENT_QUERY, INTENT_SYNC, device_type};
use crate::smart_home::registry::{ExecuteError, TraitRegistry};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

const DEVICE_NOT_FOUND: &str = "deviceNotFound";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentRequest {
    pub request_id: String,
    pub inputs: Vec<Input>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "intent")]
pub enum Input {
    #[serde(rename = "action.devices.SYNC")]
    Sync,
    #[serde(rename = "action.devices.QUERY")]
    Query { payload: QueryPayload },
    #[serde(rename = "action.devices.EXECUTE")]
    Execute { payload: ExecutePayload },
    #[serde(rename = "action.devices.DISCONNECT")]
    Disconnect,
}

impl Input {
    fn intent(&self) -> &'static str {
        match self {
            Input::Sync => INTENT_SYNC,
            Input::Query { .. } => INTENT_QUERY,
            Input::Execute { .. } => INTENT_EXECUTE,
            Input::Disconnect => INTENT_DISCONNECT,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct QueryPayload {
    pub devices: Vec<DeviceRef>,
}

#[derive(Debug, Deserialize)]
pub struct ExecutePayload {
    pub commands: Vec<CommandGroup>,
}

#[derive(Debug, Deserialize)]
pub struct CommandGroup {
    pub devices: Vec<DeviceRef>,
    pub execution: Vec<Execution>,
}

#[derive(Debug, Deserialize)]
pub struct DeviceRef {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct Execution {
    pub command: String,
    #[serde(default)]
    pub params: Params,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentResponse {
    pub request_id: String,
    pub payload: ResponsePayload,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ResponsePayload {
    Sync(SyncPayload),
    Query(QueryResponsePayload),
    Execute(ExecuteResponsePayload),
    Empty {},
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPayload {
    pub agent_user_id: String,
    pub devices: Vec<SyncDevice>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncDevice {
    pub id: String,
    #[serde(rename = "type")]
    pub device_type: &'static str,
    pub traits: Vec<&'static str>,
    pub name: DeviceName,
    pub will_report_state: bool,
    pub attributes: Attributes,
}

#[derive(Debug, Serialize)]
pub struct DeviceName {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct QueryResponsePayload {
    pub devices: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct ExecuteResponsePayload {
    pub commands: Vec<CommandResult>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult {
    pub ids: Vec<String>,
    pub status: CommandStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<&'static str>,
}

#[derive(Debug, Serialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "UPPERCASE")]
pub enum CommandStatus {
    Success,
    Error,
}

/// Answers SYNC, QUERY and EXECUTE requests of the assistant for the devices of a snapshot.
#[derive(Debug)]
pub struct Fulfillment {
    registry: Arc<TraitRegistry>,
    transport: Arc<dyn HubTransport>,
    agent_user_id: String,
}

impl Fulfillment {
    pub fn new(registry: Arc<TraitRegistry>, transport: Arc<dyn HubTransport>, agent_user_id: impl Into<String>) -> Self {
        Fulfillment {
            registry,
            transport,
            agent_user_id: agent_user_id.into(),
        }
    }

    #[instrument(skip_all, fields(request_id = request.request_id))]
    pub async fn handle(&self, request: FulfillmentRequest, devices: &DeviceSnapshot) -> Result<FulfillmentResponse, FulfillmentError> {
        let input = request.inputs.into_iter().next().ok_or(FulfillmentError::MissingInput)?;
        info!("📨 Handling {}...", input.intent());

        let payload = match input {
            Input::Sync => ResponsePayload::Sync(self.sync(devices)),
            Input::Query { payload } => ResponsePayload::Query(self.query(&payload, devices)),
            Input::Execute { payload } => ResponsePayload::Execute(self.execute(payload, devices).await),
            Input::Disconnect => ResponsePayload::Empty {},
        };

        Ok(FulfillmentResponse {
            request_id: request.request_id,
            payload,
        })
    }

    fn sync(&self, devices: &DeviceSnapshot) -> SyncPayload {
        let devices = devices
            .iter()
            .filter_map(|device| {
                let traits = self.registry.trait_names(device);
                if traits.is_empty() {
                    debug!(device_id = device.id, "Skipping '{}', no supported traits for domain {}", device.name, device.domain);
                    return None;
                }

                Some(SyncDevice {
                    id: device.id.clone(),
                    device_type: device_type(device.domain),
                    traits,
                    name: DeviceName { name: device.name.clone() },
                    will_report_state: false,
                    attributes: self.registry.sync(device),
                })
            })
            .collect::<Vec<_>>();
        info!("🔄 Synced {} device(s)", devices.len());

        SyncPayload {
            agent_user_id: self.agent_user_id.clone(),
            devices,
        }
    }

    fn query(&self, payload: &QueryPayload, devices: &DeviceSnapshot) -> QueryResponsePayload {
        let states = payload
            .devices
            .iter()
            .map(|device_ref| {
                let state = match devices.get(&device_ref.id) {
                    Some(device) => {
                        let mut state = Map::new();
                        state.insert("online".to_string(), Value::Bool(true));
                        state.extend(self.registry.query(device));
                        state
                    }
                    None => {
                        warn!(device_id = device_ref.id, "⚠️ Query for unknown device");
                        error_state(DEVICE_NOT_FOUND)
                    }
                };
                (device_ref.id.clone(), Value::Object(state))
            })
            .collect();

        QueryResponsePayload { devices: states }
    }

    async fn execute(&self, payload: ExecutePayload, devices: &DeviceSnapshot) -> ExecuteResponsePayload {
        let executions = payload.commands.iter().flat_map(move |group| {
            group
                .devices
                .iter()
                .map(move |device_ref| self.execute_device(&device_ref.id, devices.get(&device_ref.id), &group.execution))
        });

        ExecuteResponsePayload {
            commands: join_all(executions).await,
        }
    }

    async fn execute_device(&self, device_id: &str, device: Option<&Device>, executions: &[Execution]) -> CommandResult {
        let Some(device) = device else {
            warn!(device_id = device_id, "⚠️ Execute for unknown device");
            return CommandResult::error(device_id, DEVICE_NOT_FOUND);
        };

        for execution in executions {
            let result = self
                .registry
                .execute(self.transport.as_ref(), device, &execution.command, &execution.params)
                .await;

            if let Err(e) = result {
                warn!(device_id = device.id, "⚠️ Unable to execute {}: {}", execution.command, e);
                return CommandResult::from_error(device_id, &e);
            }
        }

        CommandResult {
            ids: vec![device_id.to_string()],
            status: CommandStatus::Success,
            error_code: None,
        }
    }
}

impl CommandResult {
    fn error(device_id: &str, error_code: &'static str) -> Self {
        CommandResult {
            ids: vec![device_id.to_string()],
            status: CommandStatus::Error,
            error_code: Some(error_code),
        }
    }

    fn from_error(device_id: &str, error: &ExecuteError) -> Self {
        CommandResult::error(device_id, error.error_code())
    }
}

fn error_state(error_code: &str) -> Map<String, Value> {
    let mut state = Map::new();
    state.insert("online".to_string(), Value::Bool(false));
    state.insert("status".to_string(), Value::from("ERROR"));
    state.insert("errorCode".to_string(), Value::from(error_code));
    state
}

#[derive(Error, Debug)]
pub enum FulfillmentError {
    #[error("request does not contain any input")]
    MissingInput,
}
