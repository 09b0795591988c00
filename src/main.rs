//! Command-line inspector for byte values and discovery records.
//!
//! Parses hex input through the codec layer, prints the derived forms and
//! can run a one-shot bootnode discovery for a single record.

use crate::error::AppError;
use clap::{Parser, Subcommand};
use discbytes_core::bytes_values::{
    as_signed_big_integer, as_string, as_unsigned_big_integer, concatenate, count_leading_zeros,
    count_zeros, from_hex_string, to_minimal_bytes, trim_leading_zeros,
};
use discbytes_core::{Bytes32, BytesValue, BytesView};
use discbytes_discovery::{
    DiscoveryConfig, DiscoveryService, NodeRecordFields, StaticDiscoveryService,
};
use log::{debug, info, warn};
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

mod error;

#[derive(Debug, Parser, Default)]
#[clap(ignore_errors = true)]
struct PreCli {
    /// Optional `.env` file path for loading environment variables.
    #[clap(short, long, value_name = "ENV_FILE")]
    env_file: Option<String>,
}

#[derive(Debug, Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Optional `.env` file path for loading environment variables.
    #[clap(short, long, value_name = "ENV_FILE")]
    env_file: Option<String>,

    /// Optional log level.
    #[clap(
        short = 'l',
        long,
        value_name = "LOG_LEVEL",
        env = "DISCBYTES_LOG_LEVEL",
        default_value = "info"
    )]
    log_level: String,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse a hex value and print its derived forms.
    Inspect {
        hex: String,
        /// Right-align the value in this many bytes.
        #[clap(short, long, value_name = "SIZE")]
        size: Option<usize>,
        /// Accept an odd number of hex digits.
        #[clap(long, action = clap::ArgAction::SetTrue)]
        lenient: bool,
    },
    /// Print the minimal big-endian encoding of a number.
    Minimal { value: u64 },
    /// Concatenate hex values.
    Concat {
        #[clap(required = true)]
        values: Vec<String>,
    },
    /// Build a node record and resolve it into a discovery peer.
    Peer {
        public_key: String,
        address: SocketAddr,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    let pre = PreCli::try_parse().unwrap_or_default();

    if let Some(env_file) = pre.env_file {
        dotenvy::from_filename(env_file)?;
    } else {
        dotenvy::dotenv().ok();
    }

    let cli = Cli::parse();

    let env = EnvFilter::new(format!(
        "discbytes={0},discbytes_core={0},discbytes_discovery={0},warn",
        cli.log_level
    ));
    let timer = tracing_subscriber::fmt::time::LocalTime::rfc_3339();
    tracing_subscriber::fmt()
        .with_timer(timer)
        .with_target(true)
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Inspect { hex, size, lenient } => inspect(&hex, size, lenient),
        Command::Minimal { value } => {
            println!("{}", to_minimal_bytes(value));
            Ok(())
        }
        Command::Concat { values } => {
            let parsed = values
                .iter()
                .map(|value| BytesValue::from_hex_string(value))
                .collect::<Result<Vec<_>, _>>()?;
            let views: Vec<&dyn BytesView> = parsed.iter().map(|v| v as &dyn BytesView).collect();
            println!("{}", concatenate(&views));
            Ok(())
        }
        Command::Peer {
            public_key,
            address,
        } => resolve_peer(&public_key, address).await,
    }
}

fn inspect(hex: &str, size: Option<usize>, lenient: bool) -> Result<(), AppError> {
    let value = from_hex_string(hex, size, lenient)?;
    debug!("Parsed {} bytes from {hex}", value.size());

    println!("hex:           {value}");
    println!("size:          {}", value.size());
    println!("zero bytes:    {}", count_zeros(&value));
    println!("leading zeros: {}", count_leading_zeros(&value));
    println!("trimmed:       {}", trim_leading_zeros(&value));
    println!("unsigned:      {}", as_unsigned_big_integer(&value));
    println!("signed:        {}", as_signed_big_integer(&value));
    println!("utf-8:         {:?}", as_string(&value));
    if value.size() == Bytes32::SIZE {
        let bytes32 = Bytes32::wrap_view(&value)?;
        println!("bytes32 zero:  {}", bytes32.is_zero());
    }
    Ok(())
}

async fn resolve_peer(public_key: &str, address: SocketAddr) -> Result<(), AppError> {
    let record = NodeRecordFields::new()
        .with_public_key(BytesValue::from_hex_string(public_key)?)
        .with_tcp_address(address);

    let mut service =
        StaticDiscoveryService::with_bootnodes(DiscoveryConfig::default(), vec![record]);
    service.start().await?;
    service.search_for_peers().await?;

    let mut found = false;
    for peer in service.stream_known_peers() {
        info!("Resolved peer {}", peer.public_key);
        println!("{peer}");
        found = true;
    }
    if !found {
        warn!("Record for {address} did not resolve to a peer");
    }
    service.stop().await?;
    Ok(())
}
