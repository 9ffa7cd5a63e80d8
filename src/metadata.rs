//! Metadata resolution.
//!
//! Given the token URI the standard probe produced, decide where the
//! metadata actually lives and load it:
//!
//! - An embedded data URI (base64 JSON inlined in the URI) decodes
//!   locally; the metadata is genuinely on-chain and no fetch happens.
//! - Anything else is normalized (proxied, gateway-rewritten) and fetched
//!   with a single GET, then parsed as JSON.
//!
//! The `image` field is extracted as the asset pointer. Embedded SVG image
//! values are returned in full; truncating them for display is the
//! presentation layer's business.

use anyhow::{Context, Result};
use base64::Engine;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::debug;

use crate::config::ResolverConfig;
use crate::error::ResolutionError;
use crate::record::{MetadataPointer, PointerKind};
use crate::uri;

/// Single-GET JSON fetching, as the resolver consumes it. Tests
/// substitute in-memory documents.
pub trait Fetch: Sync {
    fn get_json(&self, url: &str) -> Result<Value>;
}

/// Production fetcher over a blocking HTTP agent.
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, connect_timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout(timeout)
                .timeout_connect(connect_timeout)
                .build(),
        }
    }
}

impl Fetch for HttpFetcher {
    fn get_json(&self, url: &str) -> Result<Value> {
        self.agent
            .get(url)
            .call()
            .with_context(|| format!("GET {url}"))?
            .into_json()
            .context("response body is not JSON")
    }
}

/// What the metadata stage hands to the orchestrator.
#[derive(Debug, Clone)]
pub struct ResolvedMetadata {
    pub pointer: MetadataPointer,
    pub token_data: Map<String, Value>,
    /// True when the metadata was embedded in the URI itself.
    pub on_chain: bool,
    /// The `image` field, possibly a full embedded SVG; empty when the
    /// document has none.
    pub image_uri: String,
}

/// Resolve `token_uri` into its metadata document. Single attempt; fetch
/// or parse failure surfaces as
/// [`ResolutionError::MetadataUnavailable`], never retried.
pub fn resolve(
    fetcher: &dyn Fetch,
    config: &ResolverConfig,
    token_uri: &str,
) -> Result<ResolvedMetadata, ResolutionError> {
    let pointer = uri::classify(config, token_uri);

    let document = match &pointer.fetchable_url {
        None => decode_embedded(token_uri)?,
        Some(url) => {
            debug!(%url, "fetching off-chain metadata");
            fetcher
                .get_json(url)
                .map_err(|e| ResolutionError::MetadataUnavailable {
                    uri: token_uri.to_string(),
                    reason: format!("{e:#}"),
                })?
        }
    };

    let token_data = document
        .as_object()
        .cloned()
        .ok_or_else(|| ResolutionError::MetadataUnavailable {
            uri: token_uri.to_string(),
            reason: "metadata document is not a JSON object".to_string(),
        })?;

    let image_uri = token_data
        .get("image")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let on_chain = pointer.kind == PointerKind::Embedded;
    Ok(ResolvedMetadata {
        pointer,
        token_data,
        on_chain,
        image_uri,
    })
}

fn decode_embedded(token_uri: &str) -> Result<Value, ResolutionError> {
    let unavailable = |reason: String| ResolutionError::MetadataUnavailable {
        uri: token_uri.to_string(),
        reason,
    };

    let payload = token_uri
        .strip_prefix(uri::EMBEDDED_JSON_PREFIX)
        .ok_or_else(|| unavailable("not an embedded JSON data URI".to_string()))?;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.as_bytes())
        .map_err(|e| unavailable(format!("base64 decode failed: {e}")))?;
    serde_json::from_slice(&bytes).map_err(|e| unavailable(format!("embedded JSON invalid: {e}")))
}
