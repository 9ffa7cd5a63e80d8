//! NFT Provenance Resolver
//!
//! Resolves a marketplace link for an NFT into a normalized description of
//! where that NFT's data actually lives, whether a privileged party can
//! silently change it, and whether it is stored on-chain or off-chain:
//!
//! - **Link parsing**: marketplace URL -> (chain, contract, token id)
//! - **Standard probing**: ERC-721 queries with an ERC-1155 fallback for
//!   contracts that only answer the semi-fungible interface
//! - **Mutability probing**: speculative gas estimations against known
//!   pointer-changing functions, classified by revert message
//! - **Metadata resolution**: embedded data-URI decode or a proxied fetch,
//!   with the image pointer extracted
//!
//! See [`resolver::Resolver`] for the pipeline entry point.
//!
//! ```no_run
//! use nft_provenance::{link, Resolver};
//!
//! fn main() -> anyhow::Result<()> {
//!     let identity = link::parse("https://opensea.io/assets/ethereum/0xb7F7F6C52F2e2fdb1963Eab30438024864c313F6/1234")?;
//!     let record = Resolver::with_defaults().resolve(&identity)?;
//!     println!("{} lives at {}", record.name, record.token_uri);
//!     Ok(())
//! }
//! ```

pub mod abi;
pub mod config;
pub mod contract;
pub mod error;
pub mod link;
pub mod metadata;
pub mod mutability;
pub mod record;
pub mod resolver;
pub mod rpc;
pub mod standards;
pub mod uri;

pub use config::ResolverConfig;
pub use error::{ParseError, ResolutionError};
pub use link::{Chain, TokenIdentity};
pub use record::{MutabilityVerdict, NftRecord};
pub use resolver::Resolver;
