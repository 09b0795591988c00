use bincode::{Decode, Encode};
use discbytes_core::BytesValue;
use std::fmt::Display;
use std::net::SocketAddr;

/// A peer found by the discovery service: its public key and the address its
/// TCP transport listens on.
#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiscoveryPeer {
    pub public_key: BytesValue,
    pub node_address: SocketAddr,
}

impl DiscoveryPeer {
    pub fn new(public_key: BytesValue, node_address: SocketAddr) -> Self {
        Self {
            public_key,
            node_address,
        }
    }
}

impl Display for DiscoveryPeer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Peer key: {}; Address: {}", self.public_key, self.node_address)
    }
}
