//! Fixed-shape ABI helpers.
//!
//! The pipeline only ever speaks a handful of call shapes: no-argument
//! getters returning `string`, single-`uint256` getters returning `string`
//! or `address`, and single-`string` mutators probed via gas estimation.
//! This module covers exactly those; general ABI decoding of arbitrary
//! contracts is out of scope.

use anyhow::{anyhow, Context, Result};
use ethers_core::abi::{decode, encode, ParamType, Token};
use ethers_core::utils::keccak256;

/// 4-byte function selector for a canonical signature like
/// `tokenURI(uint256)`.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Build 0x-hex calldata: selector followed by ABI-encoded arguments.
pub fn call_data(signature: &str, args: &[Token]) -> String {
    let mut data = selector(signature).to_vec();
    data.extend(encode(args));
    format!("0x{}", hex::encode(data))
}

/// Decode a 0x-hex `string` return value.
pub fn decode_string(return_data: &str) -> Result<String> {
    let tokens = decode_return(return_data, ParamType::String)?;
    match tokens.into_iter().next() {
        Some(Token::String(s)) => Ok(s),
        other => Err(anyhow!("expected string return, got {:?}", other)),
    }
}

/// Decode a 0x-hex `address` return value to lowercase 0x-hex form.
pub fn decode_address(return_data: &str) -> Result<String> {
    let tokens = decode_return(return_data, ParamType::Address)?;
    match tokens.into_iter().next() {
        Some(Token::Address(address)) => Ok(format!("{address:?}")),
        other => Err(anyhow!("expected address return, got {:?}", other)),
    }
}

fn decode_return(return_data: &str, shape: ParamType) -> Result<Vec<Token>> {
    let stripped = return_data.strip_prefix("0x").unwrap_or(return_data);
    let bytes = hex::decode(stripped).context("return data is not hex")?;
    decode(&[shape], &bytes).context("return data does not match expected shape")
}
