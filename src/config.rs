//! Static configuration for a [`Resolver`](crate::resolver::Resolver).
//!
//! Everything the pipeline treats as ambient — RPC endpoints, the IPFS
//! gateway, the CORS relay, the mutator candidate list, the
//! authorization-denial phrase list, and the legacy contract table — lives
//! here as one immutable value passed in at construction. Tests substitute
//! their own endpoints and candidate lists instead of patching globals.

use std::time::Duration;

use crate::link::Chain;

const ETHEREUM_RPC: &str = "https://cloudflare-eth.com";
const POLYGON_RPC: &str = "https://polygon-rpc.com";
const IPFS_GATEWAY: &str = "https://ipfs.io/ipfs/";
const CORS_RELAY: &str = "https://corsproxy.he1en.workers.dev/";

/// Pointer-changing function names observed on real contracts, in
/// tie-break order. Each takes a single `string` argument.
const MUTATOR_CANDIDATES: &[&str] = &[
    "setBaseURI",
    "setBaseTokenURI",
    "setURI",
    "secureBaseUri",
    "setMetadataURI",
    "updateProjectBaseURI",
];

/// Revert-message fragments that mean "the function exists but the caller
/// is not authorized". Collected verbatim from observed contracts.
const DENIAL_PHRASES: &[&str] = &[
    "Only operator can call this method",
    "Ownable: caller is not the owner",
    "AccessControl",
];

/// A pre-standard contract with no queryable on-chain interface at all.
#[derive(Debug, Clone)]
pub struct LegacyContract {
    /// 0x-prefixed address, compared case-insensitively.
    pub address: String,
    /// Collection name to report, since the contract cannot be asked.
    pub display_name: String,
}

/// Immutable configuration for one resolver.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// JSON-RPC endpoint for Ethereum mainnet.
    pub ethereum_rpc: String,
    /// JSON-RPC endpoint for Polygon.
    pub polygon_rpc: String,
    /// HTTP gateway prefix that `ipfs://` URIs are rewritten onto.
    pub ipfs_gateway: String,
    /// CORS-bridging relay; the original URL is appended as the sole,
    /// unencoded query parameter.
    pub cors_relay: String,
    /// Candidate pointer-changing functions, probed in this order.
    pub mutator_candidates: Vec<String>,
    /// Revert-message fragments classified as authorization denials.
    pub denial_phrases: Vec<String>,
    /// Contracts resolved by short-circuit, before any network call.
    pub legacy_contracts: Vec<LegacyContract>,
    /// Overall per-request timeout for RPC and metadata fetches.
    pub http_timeout: Duration,
    /// Connect timeout for the same.
    pub connect_timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            ethereum_rpc: ETHEREUM_RPC.to_string(),
            polygon_rpc: POLYGON_RPC.to_string(),
            ipfs_gateway: IPFS_GATEWAY.to_string(),
            cors_relay: CORS_RELAY.to_string(),
            mutator_candidates: MUTATOR_CANDIDATES.iter().map(|s| s.to_string()).collect(),
            denial_phrases: DENIAL_PHRASES.iter().map(|s| s.to_string()).collect(),
            legacy_contracts: vec![LegacyContract {
                // CryptoPunks predates ERC-721; no name/tokenURI/ownerOf.
                address: "0xb47e3cd837ddf8e4c57f05d70ab865de6e193bbb".to_string(),
                display_name: "CryptoPunks".to_string(),
            }],
            http_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl ResolverConfig {
    /// The JSON-RPC endpoint for a chain.
    pub fn rpc_endpoint(&self, chain: Chain) -> &str {
        match chain {
            Chain::Ethereum => &self.ethereum_rpc,
            Chain::Polygon => &self.polygon_rpc,
        }
    }

    /// Display name for a legacy contract, if `address` is one.
    pub fn legacy_display_name(&self, address: &str) -> Option<&str> {
        self.legacy_contracts
            .iter()
            .find(|c| c.address.eq_ignore_ascii_case(address))
            .map(|c| c.display_name.as_str())
    }
}
