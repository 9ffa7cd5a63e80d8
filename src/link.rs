//! Marketplace link parsing.
//!
//! Turns a marketplace URL into a typed [`TokenIdentity`]. Two marketplaces
//! are recognized:
//!
//! - OpenSea: `opensea.io/assets/<chain>/<contract>/<tokenId>` where
//!   `<chain>` is `ethereum` or `matic`
//! - LooksRare: `looksrare.org/collections/<contract>/<tokenId>`
//!   (Ethereum only)
//!
//! The scheme prefix is optional and a trailing slash is tolerated. Path
//! keywords are case-sensitive, matching what the marketplaces emit. Pure
//! function; no network access.

use ethers_core::types::Address;
use serde::Serialize;

use crate::error::ParseError;

/// EVM chain a token lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Chain {
    Ethereum,
    Polygon,
}

/// The (chain, contract address, token id) triple identifying one NFT.
///
/// `contract_address` is canonicalized to lowercase 0x-prefixed hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenIdentity {
    pub chain: Chain,
    pub contract_address: String,
    pub token_id: u64,
}

/// Parse a marketplace URL into a [`TokenIdentity`].
pub fn parse(url: &str) -> Result<TokenIdentity, ParseError> {
    let trimmed = url.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    let path = without_scheme.trim_end_matches('/');

    if let Some(rest) = path.strip_prefix("opensea.io/assets/") {
        let mut segments = rest.split('/');
        let chain = match segments.next() {
            Some("ethereum") => Chain::Ethereum,
            Some("matic") => Chain::Polygon,
            _ => return Err(ParseError::UnrecognizedFormat(url.to_string())),
        };
        return identity_from_segments(chain, segments, url);
    }

    if let Some(rest) = path.strip_prefix("looksrare.org/collections/") {
        return identity_from_segments(Chain::Ethereum, rest.split('/'), url);
    }

    Err(ParseError::UnrecognizedFormat(url.to_string()))
}

/// Consume the `<contract>/<tokenId>` tail shared by both marketplaces.
fn identity_from_segments<'a>(
    chain: Chain,
    mut segments: impl Iterator<Item = &'a str>,
    url: &str,
) -> Result<TokenIdentity, ParseError> {
    let contract = segments
        .next()
        .ok_or_else(|| ParseError::UnrecognizedFormat(url.to_string()))?;
    let contract_address = canonical_address(contract)
        .ok_or_else(|| ParseError::UnrecognizedFormat(url.to_string()))?;

    let token_id = segments
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .ok_or_else(|| ParseError::MissingTokenId(url.to_string()))?;

    // Anything after the token id is not a link shape we know.
    if segments.next().is_some() {
        return Err(ParseError::UnrecognizedFormat(url.to_string()));
    }

    Ok(TokenIdentity {
        chain,
        contract_address,
        token_id,
    })
}

/// Validate a 0x-prefixed 20-byte hex address and return it lowercased.
fn canonical_address(raw: &str) -> Option<String> {
    if !raw.starts_with("0x") || raw.len() != 42 {
        return None;
    }
    let address: Address = raw.parse().ok()?;
    // Debug on Address prints the full lowercase 0x-hex form.
    Some(format!("{address:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTRACT: &str = "0xBC4CA0EdA7647A8aB7C2061c2E118A18a936f13D";
    const CONTRACT_LOWER: &str = "0xbc4ca0eda7647a8ab7c2061c2e118a18a936f13d";

    #[test]
    fn parses_opensea_ethereum() {
        let url = format!("https://opensea.io/assets/ethereum/{CONTRACT}/4593");
        let identity = parse(&url).unwrap();
        assert_eq!(identity.chain, Chain::Ethereum);
        assert_eq!(identity.contract_address, CONTRACT_LOWER);
        assert_eq!(identity.token_id, 4593);
    }

    #[test]
    fn parses_opensea_polygon() {
        let url = format!("https://opensea.io/assets/matic/{CONTRACT}/1");
        assert_eq!(parse(&url).unwrap().chain, Chain::Polygon);
    }

    #[test]
    fn parses_looksrare_as_ethereum() {
        let url = format!("https://looksrare.org/collections/{CONTRACT}/77");
        let identity = parse(&url).unwrap();
        assert_eq!(identity.chain, Chain::Ethereum);
        assert_eq!(identity.token_id, 77);
    }

    #[test]
    fn trailing_slash_is_equivalent() {
        let url = format!("https://opensea.io/assets/ethereum/{CONTRACT}/4593");
        let slashed = format!("{url}/");
        assert_eq!(parse(&url).unwrap(), parse(&slashed).unwrap());
    }

    #[test]
    fn scheme_is_optional() {
        let url = format!("opensea.io/assets/ethereum/{CONTRACT}/4593");
        assert_eq!(parse(&url).unwrap().token_id, 4593);
    }

    #[test]
    fn unknown_domain_is_unrecognized() {
        let url = format!("https://rarible.com/token/{CONTRACT}/1");
        assert!(matches!(
            parse(&url),
            Err(ParseError::UnrecognizedFormat(_))
        ));
    }

    #[test]
    fn unknown_chain_keyword_is_unrecognized() {
        let url = format!("https://opensea.io/assets/solana/{CONTRACT}/1");
        assert!(matches!(
            parse(&url),
            Err(ParseError::UnrecognizedFormat(_))
        ));
    }

    #[test]
    fn non_numeric_token_id_is_missing() {
        let url = format!("https://opensea.io/assets/ethereum/{CONTRACT}/abc");
        assert!(matches!(parse(&url), Err(ParseError::MissingTokenId(_))));
    }

    #[test]
    fn absent_token_id_is_missing() {
        let url = format!("https://opensea.io/assets/ethereum/{CONTRACT}");
        assert!(matches!(parse(&url), Err(ParseError::MissingTokenId(_))));
    }

    #[test]
    fn malformed_contract_is_unrecognized() {
        let url = "https://opensea.io/assets/ethereum/not-an-address/1";
        assert!(matches!(
            parse(url),
            Err(ParseError::UnrecognizedFormat(_))
        ));
    }

    #[test]
    fn error_carries_offending_input() {
        let err = parse("https://example.com/x").unwrap_err();
        assert!(err.to_string().contains("https://example.com/x"));
    }
}
