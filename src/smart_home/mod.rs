mod device_trait;
mod fulfillment;
pub mod identifiers;
mod registry;
mod traits;

pub use fulfillment::{Fulfillment, FulfillmentRequest};
pub use registry::TraitRegistry;
