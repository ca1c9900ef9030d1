//! Thin adapter over the pub/sub substrate (spec.md C4): publishing
//! per-match events and decoding inbound push deliveries.

mod bus;
mod envelope;
mod error;

pub use bus::{BusConfig, EventBus};
pub use envelope::decode_match_envelope;
pub use error::BusError;
