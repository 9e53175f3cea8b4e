mod client;
mod command;
mod transport;

pub use client::new_client;
pub use command::{HubCommand, SET_SETPOINT, SwitchCmd};
#[cfg(test)]
pub use transport::testing;
pub use transport::{DomoticzTransport, HubError, HubTransport};
