use crate::domain::Device;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{info, instrument};

/// The devices known to the hub, in the order the hub listed them.
#[derive(Debug, Default)]
pub struct DeviceSnapshot {
    devices: Vec<Device>,
    index: HashMap<String, usize>,
}

impl DeviceSnapshot {
    pub fn new(devices: Vec<Device>) -> Result<Self, DeviceSnapshotError> {
        let mut index = HashMap::with_capacity(devices.len());
        for (position, device) in devices.iter().enumerate() {
            if index.insert(device.id.clone(), position).is_some() {
                return Err(DeviceSnapshotError::DuplicateDevice { device_id: device.id.clone() });
            }
        }

        Ok(DeviceSnapshot { devices, index })
    }

    #[instrument]
    pub async fn load(path: &str) -> Result<Self, DeviceSnapshotError> {
        info!("Loading devices...");
        let json = tokio::fs::read_to_string(Path::new(path)).await?;
        let snapshot = DeviceSnapshot::new(serde_json::from_str::<Vec<Device>>(&json)?)?;
        info!("Loading devices... OK, {} found", snapshot.len());

        Ok(snapshot)
    }

    pub fn get(&self, device_id: &str) -> Option<&Device> {
        self.index.get(device_id).map(|position| &self.devices[*position])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Device> {
        self.devices.iter()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }
}

#[derive(Error, Debug)]
pub enum DeviceSnapshotError {
    #[error("unable to read the device snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid device snapshot: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("device '{device_id}' is listed more than once")]
    DuplicateDevice { device_id: String },
}
