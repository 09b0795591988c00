//! The discovery service contract and a bootnode-backed implementation.
use crate::config::DiscoveryConfig;
use crate::error::{DiscoveryError, DiscoveryErrorKind};
use crate::node_record::{NodeRecord, NodeRecordFields, convert_to_discovery_peer};
use crate::peer::DiscoveryPeer;
use discbytes_core::BytesValue;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::future::Future;

pub trait DiscoveryService {
    fn start(&mut self) -> impl Future<Output = Result<(), DiscoveryError>> + Send;

    fn stop(&mut self) -> impl Future<Output = Result<(), DiscoveryError>> + Send;

    /// Each call yields the peers known at that moment, from the beginning.
    fn stream_known_peers(&self) -> impl Iterator<Item = DiscoveryPeer> + '_;

    fn search_for_peers(&mut self) -> impl Future<Output = Result<(), DiscoveryError>> + Send;

    fn get_enr(&self) -> Option<String>;

    fn update_custom_enr_field(&mut self, field_name: &str, value: BytesValue);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    Idle,
    Running,
    Stopped,
}

/// Resolves peers from a fixed set of bootnode records.
#[derive(Debug)]
pub struct StaticDiscoveryService {
    config: DiscoveryConfig,
    bootnodes: Vec<NodeRecordFields>,
    local_record: NodeRecordFields,
    known_peers: Vec<DiscoveryPeer>,
    state: ServiceState,
}

impl StaticDiscoveryService {
    pub fn new(config: DiscoveryConfig) -> Result<Self, DiscoveryError> {
        config.validate()?;
        let bootnodes = config.parse_bootnodes()?;
        Ok(Self::with_bootnodes(config, bootnodes))
    }

    pub fn with_bootnodes(config: DiscoveryConfig, bootnodes: Vec<NodeRecordFields>) -> Self {
        Self {
            config,
            bootnodes,
            local_record: NodeRecordFields::new(),
            known_peers: Vec::new(),
            state: ServiceState::Idle,
        }
    }

    pub fn state(&self) -> ServiceState {
        self.state
    }

    pub fn local_record(&self) -> &NodeRecordFields {
        &self.local_record
    }

    fn require_state(&self, expected: ServiceState, action: &str) -> Result<(), DiscoveryError> {
        if self.state != expected {
            return Err(DiscoveryError::new(
                DiscoveryErrorKind::InvalidState,
                format!("Cannot {action} while the service is {:?}", self.state).as_str(),
            ));
        }
        Ok(())
    }
}

impl DiscoveryService for StaticDiscoveryService {
    async fn start(&mut self) -> Result<(), DiscoveryError> {
        self.require_state(ServiceState::Idle, "start")?;
        self.state = ServiceState::Running;
        info!(
            "Discovery service started with {} bootnodes",
            self.bootnodes.len()
        );
        Ok(())
    }

    async fn stop(&mut self) -> Result<(), DiscoveryError> {
        self.require_state(ServiceState::Running, "stop")?;
        self.state = ServiceState::Stopped;
        info!("Discovery service stopped");
        Ok(())
    }

    fn stream_known_peers(&self) -> impl Iterator<Item = DiscoveryPeer> + '_ {
        self.known_peers.iter().cloned()
    }

    async fn search_for_peers(&mut self) -> Result<(), DiscoveryError> {
        self.require_state(ServiceState::Running, "search for peers")?;
        let mut seen: HashSet<BytesValue> = self
            .known_peers
            .iter()
            .map(|peer| peer.public_key.clone())
            .collect();
        for record in &self.bootnodes {
            if self.known_peers.len() >= self.config.max_known_peers {
                warn!(
                    "Known peer limit of {} reached, ignoring remaining bootnodes",
                    self.config.max_known_peers
                );
                break;
            }
            let Some(peer) = convert_to_discovery_peer(record) else {
                continue;
            };
            if seen.insert(peer.public_key.clone()) {
                debug!("Discovered {peer}");
                self.known_peers.push(peer);
            }
        }
        Ok(())
    }

    fn get_enr(&self) -> Option<String> {
        match self.state {
            ServiceState::Running => self.config.local_enr.clone(),
            _ => None,
        }
    }

    fn update_custom_enr_field(&mut self, field_name: &str, value: BytesValue) {
        debug!("Updating record field {field_name} to {value}");
        self.local_record.set_field(field_name, value);
    }
}

impl NodeRecord for StaticDiscoveryService {
    fn get(&self, field: &str) -> Option<&BytesValue> {
        self.local_record.get(field)
    }
}
