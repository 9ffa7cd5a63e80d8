//! URI normalization.
//!
//! Token URIs come in three shapes: `ipfs://` content-addressed locators,
//! `data:` URIs with the metadata inlined, and plain remote URLs. This
//! module rewrites them into something a GET request can reach:
//!
//! - `ipfs://` is rewritten onto a public HTTP gateway. The gateway
//!   already returns permissive CORS headers, so the proxy hint is
//!   ignored on this branch.
//! - Remote URLs frequently lack CORS headers, so when `proxy_hint` is
//!   set they are wrapped through a pass-through relay that adds them.
//!   The original URL rides as the single, unencoded query parameter.
//! - Embedded `data:` URIs need no fetch at all.
//!
//! Pure and deterministic; no network access here.

use crate::config::ResolverConfig;
use crate::record::{MetadataPointer, PointerKind};

/// Scheme prefix of content-addressed URIs.
pub const IPFS_SCHEME: &str = "ipfs://";

/// Prefix of metadata embedded directly in a token URI.
pub const EMBEDDED_JSON_PREFIX: &str = "data:application/json;base64,";

/// Rewrite `uri` into a directly fetchable URL.
pub fn normalize(config: &ResolverConfig, uri: &str, proxy_hint: bool) -> String {
    if let Some(cid_path) = uri.strip_prefix(IPFS_SCHEME) {
        return format!("{}{}", config.ipfs_gateway, cid_path);
    }
    if proxy_hint {
        return format!("{}?{}", config.cors_relay.trim_end_matches('?'), uri);
    }
    uri.to_string()
}

/// Classify a metadata URI and, unless it is embedded, compute its
/// fetchable (proxied) form.
pub fn classify(config: &ResolverConfig, uri: &str) -> MetadataPointer {
    let kind = if uri.starts_with(EMBEDDED_JSON_PREFIX) {
        PointerKind::Embedded
    } else if uri.starts_with(IPFS_SCHEME) {
        PointerKind::ContentAddressed
    } else {
        PointerKind::HttpRemote
    };

    let fetchable_url = match kind {
        PointerKind::Embedded => None,
        _ => Some(normalize(config, uri, true)),
    };

    MetadataPointer {
        raw: uri.to_string(),
        kind,
        fetchable_url,
    }
}
