use crate::error::{DiscoveryError, DiscoveryErrorKind};
use crate::node_record::NodeRecordFields;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_KNOWN_PEERS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Externally encoded record advertised by this node.
    pub local_enr: Option<String>,
    pub max_known_peers: usize,
    /// Bootnode records in the `name=0x..,name=0x..` text form.
    pub bootnodes: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            local_enr: None,
            max_known_peers: DEFAULT_MAX_KNOWN_PEERS,
            bootnodes: Vec::new(),
        }
    }
}

impl DiscoveryConfig {
    pub fn parse_bootnodes(&self) -> Result<Vec<NodeRecordFields>, DiscoveryError> {
        self.bootnodes
            .iter()
            .map(|record| NodeRecordFields::parse(record))
            .collect()
    }

    pub fn validate(&self) -> Result<(), DiscoveryError> {
        if self.max_known_peers == 0 {
            return Err(DiscoveryError::new(
                DiscoveryErrorKind::InvalidConfig,
                "max_known_peers must be at least 1",
            ));
        }
        Ok(())
    }
}
