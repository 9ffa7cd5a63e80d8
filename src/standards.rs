//! Token standard probing.
//!
//! Contracts answer one of two incompatible interfaces, and nothing
//! reliable tells us which in advance, so we try the non-fungible path
//! first and fall back:
//!
//! 1. **ERC-721**: `tokenURI(id)` plus `ownerOf(id)`. Both must answer.
//! 2. **ERC-1155**: `uri(id)` returns a template with a `{id}`
//!    placeholder; the standard has no per-token owner query, so
//!    ownership is reported as unknown.
//!
//! `name()` is cosmetic: its failure degrades to a placeholder instead of
//! forcing the fallback. Only both paths failing is fatal.

use tracing::{debug, warn};

use crate::contract::ContractHandle;
use crate::error::ResolutionError;
use crate::rpc::RpcError;

/// Name reported when the contract has no working `name()` getter.
pub const FALLBACK_NAME: &str = "Unnamed collection";

/// Placeholder token ERC-1155 URI templates carry.
const ID_PLACEHOLDER: &str = "{id}";

/// Outcome of the standard probe, tagged by which interface answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StandardFields {
    /// The contract answered the ERC-721 per-token queries.
    Erc721 {
        name: String,
        token_uri: String,
        owner: String,
    },
    /// Only the ERC-1155 template query answered; no owner exists.
    Erc1155 { name: String, token_uri: String },
}

impl StandardFields {
    pub fn name(&self) -> &str {
        match self {
            Self::Erc721 { name, .. } | Self::Erc1155 { name, .. } => name,
        }
    }

    pub fn token_uri(&self) -> &str {
        match self {
            Self::Erc721 { token_uri, .. } | Self::Erc1155 { token_uri, .. } => token_uri,
        }
    }

    /// `None` exactly when the standard has no ownership query.
    pub fn owner(&self) -> Option<&str> {
        match self {
            Self::Erc721 { owner, .. } => Some(owner),
            Self::Erc1155 { .. } => None,
        }
    }
}

/// Probe `handle` for name, token URI and owner, falling back across
/// standards. The two attempts are sequential: the second only makes
/// sense as an interpretation of the first one failing.
pub fn probe(handle: &ContractHandle, token_id: u64) -> Result<StandardFields, ResolutionError> {
    let name = match handle.name() {
        Ok(name) => name,
        Err(e) => {
            warn!(contract = handle.address(), error = %e, "name() failed, using placeholder");
            FALLBACK_NAME.to_string()
        }
    };

    let erc721_failure = match handle.token_uri(token_id) {
        Ok(token_uri) => match handle.owner_of(token_id) {
            Ok(owner) => {
                debug!(contract = handle.address(), "resolved via ERC-721");
                return Ok(StandardFields::Erc721 {
                    name,
                    token_uri,
                    owner,
                });
            }
            Err(e) => e,
        },
        Err(e) => e,
    };

    warn!(
        contract = handle.address(),
        error = %erc721_failure,
        "ERC-721 path failed, trying ERC-1155"
    );

    match handle.uri(token_id) {
        Ok(template) => {
            debug!(contract = handle.address(), "resolved via ERC-1155");
            Ok(StandardFields::Erc1155 {
                name,
                // Literal decimal substitution; see DESIGN.md on the
                // zero-padded-hex form the standard prescribes.
                token_uri: template.replace(ID_PLACEHOLDER, &token_id.to_string()),
            })
        }
        // An endpoint we never reached says nothing about the contract.
        Err(RpcError::Transport(reason)) => Err(ResolutionError::NetworkFailure {
            context: format!("token standard probe of {}", handle.address()),
            reason,
        }),
        Err(e) => {
            debug!(contract = handle.address(), error = %e, "ERC-1155 path failed too");
            Err(ResolutionError::UnsupportedContract(
                handle.address().to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi;
    use crate::rpc::{CallTransport, RpcError};
    use ethers_core::abi::{encode, Token};
    use std::collections::HashMap;

    const ADDRESS: &str = "0xbc4ca0eda7647a8ab7c2061c2e118a18a936f13d";

    fn string_return(value: &str) -> String {
        format!("0x{}", hex::encode(encode(&[Token::String(value.to_string())])))
    }

    fn address_return(value: &str) -> String {
        let address: ethers_core::types::Address = value.parse().unwrap();
        format!("0x{}", hex::encode(encode(&[Token::Address(address)])))
    }

    /// Transport scripted per function selector.
    struct Scripted {
        responses: HashMap<String, Result<String, RpcError>>,
    }

    impl Scripted {
        fn new() -> Self {
            Self {
                responses: HashMap::new(),
            }
        }

        fn answer(mut self, signature: &str, return_data: String) -> Self {
            self.responses
                .insert(hex::encode(abi::selector(signature)), Ok(return_data));
            self
        }

        fn revert(mut self, signature: &str, message: &str) -> Self {
            self.responses.insert(
                hex::encode(abi::selector(signature)),
                Err(RpcError::Execution(message.to_string())),
            );
            self
        }
    }

    impl CallTransport for Scripted {
        fn call(&self, _to: &str, data: &str) -> Result<String, RpcError> {
            let selector = &data[2..10];
            match self.responses.get(selector) {
                Some(response) => response.clone(),
                None => Err(RpcError::Execution("execution reverted".to_string())),
            }
        }

        fn estimate_gas(&self, _to: &str, _data: &str) -> Result<u64, RpcError> {
            Err(RpcError::Execution("execution reverted".to_string()))
        }
    }

    #[test]
    fn erc721_path_wins_when_it_answers() {
        let transport = Scripted::new()
            .answer("name()", string_return("Bored Apes"))
            .answer("tokenURI(uint256)", string_return("ipfs://QmAbc/7"))
            .answer(
                "ownerOf(uint256)",
                address_return("0x5b76ad0692372bf66d9cd6b2a9ab92e569b1d01c"),
            );

        let handle = ContractHandle::new(&transport, ADDRESS);
        let fields = probe(&handle, 7).unwrap();
        assert_eq!(fields.name(), "Bored Apes");
        assert_eq!(fields.token_uri(), "ipfs://QmAbc/7");
        assert_eq!(
            fields.owner(),
            Some("0x5b76ad0692372bf66d9cd6b2a9ab92e569b1d01c")
        );
    }

    #[test]
    fn falls_back_to_erc1155_template() {
        let transport = Scripted::new()
            .answer("name()", string_return("Semi Fungibles"))
            .revert("tokenURI(uint256)", "function selector not recognized")
            .answer("uri(uint256)", string_return("https://host/{id}.json"));

        let handle = ContractHandle::new(&transport, ADDRESS);
        let fields = probe(&handle, 7).unwrap();
        assert!(matches!(fields, StandardFields::Erc1155 { .. }));
        assert_eq!(fields.token_uri(), "https://host/7.json");
        assert_eq!(fields.owner(), None);
    }

    #[test]
    fn owner_failure_also_falls_back() {
        let transport = Scripted::new()
            .answer("name()", string_return("Odd"))
            .answer("tokenURI(uint256)", string_return("https://host/{id}.json"))
            .revert("ownerOf(uint256)", "execution reverted")
            .answer("uri(uint256)", string_return("https://host/{id}.json"));

        let handle = ContractHandle::new(&transport, ADDRESS);
        let fields = probe(&handle, 3).unwrap();
        assert_eq!(fields.owner(), None);
        assert_eq!(fields.token_uri(), "https://host/3.json");
    }

    #[test]
    fn name_failure_alone_degrades_to_placeholder() {
        let transport = Scripted::new()
            .revert("name()", "execution reverted")
            .answer("tokenURI(uint256)", string_return("ipfs://QmAbc/1"))
            .answer(
                "ownerOf(uint256)",
                address_return("0x5b76ad0692372bf66d9cd6b2a9ab92e569b1d01c"),
            );

        let handle = ContractHandle::new(&transport, ADDRESS);
        let fields = probe(&handle, 1).unwrap();
        assert_eq!(fields.name(), FALLBACK_NAME);
        assert!(matches!(fields, StandardFields::Erc721 { .. }));
    }

    #[test]
    fn unreachable_endpoint_is_a_network_failure() {
        struct Unreachable;
        impl CallTransport for Unreachable {
            fn call(&self, _: &str, _: &str) -> Result<String, RpcError> {
                Err(RpcError::Transport("connection refused".to_string()))
            }
            fn estimate_gas(&self, _: &str, _: &str) -> Result<u64, RpcError> {
                unreachable!()
            }
        }

        let handle = ContractHandle::new(&Unreachable, ADDRESS);
        let err = probe(&handle, 1).unwrap_err();
        assert!(matches!(err, ResolutionError::NetworkFailure { .. }));
    }

    #[test]
    fn both_paths_failing_is_unsupported_contract() {
        let transport = Scripted::new();
        let handle = ContractHandle::new(&transport, ADDRESS);
        let err = probe(&handle, 1).unwrap_err();
        match err {
            ResolutionError::UnsupportedContract(address) => assert_eq!(address, ADDRESS),
            other => panic!("expected UnsupportedContract, got {other:?}"),
        }
    }
}
