//! Node records and their conversion into [`DiscoveryPeer`]s.
//!
//! The record itself is opaque here: anything exposing named byte fields can
//! implement [`NodeRecord`]. [`NodeRecordFields`] is a plain in-memory record.
use crate::error::{DiscoveryError, DiscoveryErrorKind};
use crate::peer::DiscoveryPeer;
use discbytes_core::BytesValue;
use discbytes_core::BytesView;
use discbytes_core::bytes_values::{to_minimal_bytes, trim_leading_zeros};
use log::debug;
use std::collections::BTreeMap;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

/// Well-known record field names.
pub struct EnrField;

impl EnrField {
    pub const ID: &'static str = "id";
    pub const PKEY_SECP256K1: &'static str = "secp256k1";
    pub const IP_V4: &'static str = "ip";
    pub const TCP_V4: &'static str = "tcp";
    pub const UDP_V4: &'static str = "udp";
    pub const IP_V6: &'static str = "ip6";
    pub const TCP_V6: &'static str = "tcp6";
}

pub trait NodeRecord {
    fn get(&self, field: &str) -> Option<&BytesValue>;

    /// The advertised TCP endpoint, IPv4 first.
    fn tcp_address(&self) -> Option<SocketAddr> {
        let ipv4 = self
            .get(EnrField::IP_V4)
            .and_then(|ip| <[u8; 4]>::try_from(ip.as_slice()).ok())
            .map(|octets| IpAddr::V4(Ipv4Addr::from(octets)));
        if let (Some(ip), Some(port)) = (ipv4, self.get(EnrField::TCP_V4).and_then(decode_port)) {
            return Some(SocketAddr::new(ip, port));
        }

        let ipv6 = self
            .get(EnrField::IP_V6)
            .and_then(|ip| <[u8; 16]>::try_from(ip.as_slice()).ok())
            .map(|octets| IpAddr::V6(Ipv6Addr::from(octets)));
        let port = self.get(EnrField::TCP_V6).and_then(decode_port)?;
        Some(SocketAddr::new(ipv6?, port))
    }
}

/// Ports are stored as minimal big-endian integers.
fn decode_port(value: &BytesValue) -> Option<u16> {
    let trimmed = trim_leading_zeros(value);
    if trimmed.size() > 2 {
        return None;
    }
    Some(
        trimmed
            .as_slice()
            .iter()
            .fold(0u16, |port, byte| port << 8 | u16::from(*byte)),
    )
}

/// Builds a peer from a record that advertises both a TCP endpoint and a
/// secp256k1 key. The key value is shared with the record, not copied.
pub fn convert_to_discovery_peer<R: NodeRecord + ?Sized>(record: &R) -> Option<DiscoveryPeer> {
    let Some(address) = record.tcp_address() else {
        debug!("Skipping node record without a TCP address");
        return None;
    };
    let Some(public_key) = record.get(EnrField::PKEY_SECP256K1) else {
        debug!("Skipping node record at {address} without a public key");
        return None;
    };
    Some(DiscoveryPeer::new(public_key.clone(), address))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeRecordFields {
    fields: BTreeMap<String, BytesValue>,
}

impl NodeRecordFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: &str, value: BytesValue) -> Self {
        self.set_field(name, value);
        self
    }

    pub fn set_field(&mut self, name: &str, value: BytesValue) {
        self.fields.insert(name.to_owned(), value);
    }

    pub fn with_public_key(self, public_key: BytesValue) -> Self {
        self.with_field(EnrField::PKEY_SECP256K1, public_key)
    }

    pub fn with_tcp_address(self, address: SocketAddr) -> Self {
        let port = to_minimal_bytes(u64::from(address.port()));
        match address.ip() {
            IpAddr::V4(ip) => self
                .with_field(EnrField::IP_V4, BytesValue::of(&ip.octets()))
                .with_field(EnrField::TCP_V4, port),
            IpAddr::V6(ip) => self
                .with_field(EnrField::IP_V6, BytesValue::of(&ip.octets()))
                .with_field(EnrField::TCP_V6, port),
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &BytesValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Parses `name=0x..` pairs separated by commas.
    pub fn parse(value: &str) -> Result<Self, DiscoveryError> {
        let mut record = Self::new();
        for pair in value.split(',').filter(|pair| !pair.is_empty()) {
            let (name, hex) = pair.split_once('=').ok_or_else(|| {
                DiscoveryError::new(
                    DiscoveryErrorKind::InvalidNodeRecord,
                    format!("Field {pair} is not of the form name=hex").as_str(),
                )
            })?;
            record.set_field(name.trim(), BytesValue::from_hex_string(hex.trim())?);
        }
        Ok(record)
    }
}

impl NodeRecord for NodeRecordFields {
    fn get(&self, field: &str) -> Option<&BytesValue> {
        self.fields.get(field)
    }
}
