use crate::app_config::AppConfig;
use crate::device_snapshot::DeviceSnapshot;
use crate::hub::{DomoticzTransport, HubTransport};
use crate::smart_home::{Fulfillment, FulfillmentRequest, TraitRegistry};
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::{info, trace};

mod app_config;
mod device_snapshot;
mod domain;
mod hub;
mod smart_home;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stdout carries the response to the assistant
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = Arc::new(AppConfig::load()?);
    info!("✅  Loaded configuration");

    let client = hub::new_client(&config)?;
    let transport: Arc<dyn HubTransport> = Arc::new(DomoticzTransport::new(client, config.clone()));

    let registry = Arc::new(TraitRegistry::standard(config.hub().temperature_unit())?);
    info!("✅  Registered {} traits", registry.len());

    let devices = DeviceSnapshot::load(config.core().devices_file()).await?;
    info!("✅  Loaded {} device(s)", devices.len());

    let fulfillment = Fulfillment::new(registry, transport, config.assistant().agent_user_id());

    let mut input = String::new();
    tokio::io::stdin().read_to_string(&mut input).await?;
    let request = serde_json::from_str::<FulfillmentRequest>(&input)?;
    trace!("Received request: {:?}", request);

    let response = fulfillment.handle(request, &devices).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    info!("🔥 {} handled the request", env!("CARGO_PKG_NAME"));
    Ok(())
}
