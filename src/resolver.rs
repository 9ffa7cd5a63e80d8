//! Resolution orchestration.
//!
//! [`Resolver`] owns the static configuration and composes the stages:
//! standard probe, mutability probe, metadata resolution, record
//! assembly. Each call to [`Resolver::resolve`] builds its own transport
//! and fetcher; nothing is shared or cached across resolutions.
//!
//! One special case runs before anything else: contracts from the
//! pre-standard era (CryptoPunks) have no queryable interface at all, so
//! they short-circuit to a minimal record without a single network call.

use serde_json::Map;
use tracing::{debug, info};

use crate::config::ResolverConfig;
use crate::contract::ContractHandle;
use crate::error::ResolutionError;
use crate::link::TokenIdentity;
use crate::metadata::{self, Fetch, HttpFetcher};
use crate::mutability;
use crate::record::{MutabilityVerdict, NftRecord};
use crate::rpc::{CallTransport, RpcClient};
use crate::standards;

/// The pipeline entry point.
pub struct Resolver {
    config: ResolverConfig,
}

impl Resolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(ResolverConfig::default())
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve one identity into a record, building a fresh transport and
    /// fetcher for this resolution.
    pub fn resolve(&self, identity: &TokenIdentity) -> Result<NftRecord, ResolutionError> {
        let transport = RpcClient::new(
            self.config.rpc_endpoint(identity.chain),
            self.config.http_timeout,
            self.config.connect_timeout,
        );
        let fetcher = HttpFetcher::new(self.config.http_timeout, self.config.connect_timeout);
        self.resolve_with(&transport, &fetcher, identity)
    }

    /// Resolve over caller-supplied transports. This is the seam tests
    /// use to substitute mock endpoints.
    pub fn resolve_with(
        &self,
        transport: &dyn CallTransport,
        fetcher: &dyn Fetch,
        identity: &TokenIdentity,
    ) -> Result<NftRecord, ResolutionError> {
        if let Some(display_name) = self.config.legacy_display_name(&identity.contract_address) {
            info!(
                contract = %identity.contract_address,
                "pre-standard contract, skipping all probing"
            );
            return Ok(legacy_record(display_name));
        }

        let handle = ContractHandle::new(transport, &identity.contract_address);

        let fields = standards::probe(&handle, identity.token_id)?;
        let verdict = mutability::probe(&handle, &self.config);
        debug!(?verdict, token_uri = fields.token_uri(), "probing complete");

        let resolved = metadata::resolve(fetcher, &self.config, fields.token_uri())?;

        Ok(NftRecord {
            name: fields.name().to_string(),
            token_uri: fields.token_uri().to_string(),
            token_data: resolved.token_data,
            on_chain: resolved.on_chain,
            image_uri: resolved.image_uri,
            owner_address: fields.owner().map(String::from),
            mutability: verdict,
        })
    }
}

/// Minimal record for a contract that cannot be asked anything.
fn legacy_record(name: &str) -> NftRecord {
    NftRecord {
        name: name.to_string(),
        token_uri: String::new(),
        token_data: Map::new(),
        on_chain: false,
        image_uri: String::new(),
        owner_address: None,
        mutability: MutabilityVerdict::Unknown,
    }
}
