//! Boundary types for peer discovery.
//!
//! Node records carry their fields as [`discbytes_core::BytesValue`]s; this
//! crate turns them into [`DiscoveryPeer`]s and defines the service contract a
//! discovery implementation exposes. No wire protocol lives here.

pub mod config;
pub mod error;
pub mod node_record;
pub mod peer;
pub mod service;

pub use config::DiscoveryConfig;
pub use error::{DiscoveryError, DiscoveryErrorKind};
pub use node_record::{EnrField, NodeRecord, NodeRecordFields, convert_to_discovery_peer};
pub use peer::DiscoveryPeer;
pub use service::{DiscoveryService, ServiceState, StaticDiscoveryService};
