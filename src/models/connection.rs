use std::fmt;
use std::str::FromStr;

/// Human readable name of the network a wallet is connected to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkLabel {
    pub label: String,
}

impl NetworkLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into() }
    }
}

impl fmt::Display for NetworkLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Handle supplied by the wallet connection provider.
///
/// The dashboard only ever reads it. Two handles are the same connection
/// when both the address and the network label match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionHandle {
    pub address: String,
    pub network: NetworkLabel,
}

impl ConnectionHandle {
    /// Create a new connection handle
    pub fn new(address: impl Into<String>, network: NetworkLabel) -> Self {
        Self {
            address: address.into(),
            network,
        }
    }
}

/// Solana cluster the RPC endpoint belongs to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cluster {
    #[default]
    Devnet,
    Testnet,
    MainnetBeta,
    Localnet,
    Custom(String),
}

impl Cluster {
    /// Public JSON-RPC endpoint for the cluster
    pub fn rpc_url(&self) -> &str {
        match self {
            Cluster::Devnet => "https://api.devnet.solana.com",
            Cluster::Testnet => "https://api.testnet.solana.com",
            Cluster::MainnetBeta => "https://api.mainnet-beta.solana.com",
            Cluster::Localnet => "http://127.0.0.1:8899",
            Cluster::Custom(url) => url,
        }
    }

    /// Label shown as "Current Network" on the dashboard
    pub fn label(&self) -> NetworkLabel {
        let label = match self {
            Cluster::Devnet => "devnet",
            Cluster::Testnet => "testnet",
            Cluster::MainnetBeta => "mainnet-beta",
            Cluster::Localnet => "localnet",
            Cluster::Custom(_) => "custom",
        };
        NetworkLabel::new(label)
    }
}

impl FromStr for Cluster {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "devnet" | "d" => Ok(Cluster::Devnet),
            "testnet" | "t" => Ok(Cluster::Testnet),
            "mainnet-beta" | "mainnet" | "m" => Ok(Cluster::MainnetBeta),
            "localnet" | "localhost" | "l" => Ok(Cluster::Localnet),
            other if other.starts_with("http://") || other.starts_with("https://") => {
                Ok(Cluster::Custom(s.trim().to_string()))
            }
            _ => Err(anyhow::anyhow!("Unsupported cluster: {}", s)),
        }
    }
}
