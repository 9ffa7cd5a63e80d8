//! Per-resolution contract binding.
//!
//! A [`ContractHandle`] ties a transport to one contract address for the
//! duration of a single resolution, and exposes typed wrappers for the
//! fixed ABI fragment the pipeline knows about. Handles are created per
//! resolution and never cached across calls.

use ethers_core::abi::Token;

use crate::abi;
use crate::rpc::{CallTransport, RpcError};

/// Placeholder argument for speculative mutator estimations. The value is
/// irrelevant; the dry run only has to reach the authorization check.
const MUTATOR_PLACEHOLDER: &str = "new_uri";

/// One contract on one chain, for one resolution.
pub struct ContractHandle<'a> {
    transport: &'a dyn CallTransport,
    address: String,
}

impl<'a> ContractHandle<'a> {
    /// Bind `address` (canonical lowercase 0x-hex) to a transport.
    pub fn new(transport: &'a dyn CallTransport, address: &str) -> Self {
        Self {
            transport,
            address: address.to_string(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// ERC-721/1155 optional `name()` getter.
    pub fn name(&self) -> Result<String, RpcError> {
        self.call_string("name()", &[])
    }

    /// ERC-721 `tokenURI(uint256)`.
    pub fn token_uri(&self, token_id: u64) -> Result<String, RpcError> {
        self.call_string("tokenURI(uint256)", &[Token::Uint(token_id.into())])
    }

    /// ERC-1155 `uri(uint256)` template getter.
    pub fn uri(&self, token_id: u64) -> Result<String, RpcError> {
        self.call_string("uri(uint256)", &[Token::Uint(token_id.into())])
    }

    /// ERC-721 `ownerOf(uint256)`; no ERC-1155 equivalent exists.
    pub fn owner_of(&self, token_id: u64) -> Result<String, RpcError> {
        let data = abi::call_data("ownerOf(uint256)", &[Token::Uint(token_id.into())]);
        let return_data = self.transport.call(&self.address, &data)?;
        abi::decode_address(&return_data).map_err(|e| RpcError::Malformed(e.to_string()))
    }

    /// Dry-run `function(string)` with a placeholder argument via gas
    /// estimation. Read-only; never submits a transaction.
    pub fn estimate_mutator(&self, function: &str) -> Result<u64, RpcError> {
        let signature = format!("{function}(string)");
        let data = abi::call_data(&signature, &[Token::String(MUTATOR_PLACEHOLDER.to_string())]);
        self.transport.estimate_gas(&self.address, &data)
    }

    fn call_string(&self, signature: &str, args: &[Token]) -> Result<String, RpcError> {
        let data = abi::call_data(signature, args);
        let return_data = self.transport.call(&self.address, &data)?;
        abi::decode_string(&return_data).map_err(|e| RpcError::Malformed(e.to_string()))
    }
}
