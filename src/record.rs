//! Public data model produced by the pipeline.

use serde::Serialize;
use serde_json::{Map, Value};

/// Whether, and through which function, a privileged party can replace the
/// token's metadata pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MutabilityVerdict {
    /// No probed pointer-changing function is present and gated.
    Immutable,
    /// The named function exists and is gated behind an authorization
    /// check, so whoever holds that authorization can repoint the token.
    ChangeableBy(String),
    /// The contract was never probed (legacy short-circuit); presentation
    /// should render this neutrally.
    Unknown,
}

/// How a metadata URI is stored, and how to reach it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PointerKind {
    /// `ipfs://` locator, addressed by content hash.
    ContentAddressed,
    /// Data inlined in the URI itself; nothing to fetch.
    Embedded,
    /// Plain remote URL on someone's server.
    HttpRemote,
}

/// A classified metadata URI.
///
/// `fetchable_url` is `None` exactly when `kind` is
/// [`PointerKind::Embedded`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataPointer {
    pub raw: String,
    pub kind: PointerKind,
    pub fetchable_url: Option<String>,
}

/// The final artifact of one resolution, consumed by presentation.
///
/// `owner_address` is `None` exactly when the standard that answered has
/// no per-token ownership query (ERC-1155).
#[derive(Debug, Clone, Serialize)]
pub struct NftRecord {
    pub name: String,
    pub token_uri: String,
    /// Parsed metadata document. Key order is irrelevant to consumers
    /// except that presentation renders `image` last; see
    /// [`NftRecord::token_data_entries`].
    pub token_data: Map<String, Value>,
    /// True when the metadata was embedded in the token URI itself.
    pub on_chain: bool,
    pub image_uri: String,
    pub owner_address: Option<String>,
    pub mutability: MutabilityVerdict,
}

impl NftRecord {
    /// Token-data entries with `image` moved to the end, the display order
    /// presentation uses to emphasize the image pointer.
    pub fn token_data_entries(&self) -> Vec<(&str, &Value)> {
        let mut entries: Vec<(&str, &Value)> = Vec::with_capacity(self.token_data.len());
        let mut image: Option<(&str, &Value)> = None;
        for (key, value) in &self.token_data {
            if key == "image" {
                image = Some((key.as_str(), value));
            } else {
                entries.push((key.as_str(), value));
            }
        }
        entries.extend(image);
        entries
    }
}
