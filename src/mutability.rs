//! Mutability probing.
//!
//! Nothing on-chain declares "this token's pointer can be replaced", but
//! contracts that can do it expose one of a small set of historically
//! observed setter functions, all gated behind an authorization check. We
//! dry-run each candidate via gas estimation: a revert that reads like an
//! authorization denial means the function exists and is gated, so a
//! privileged party could call it for real.
//!
//! Documented approximation, kept from the original behavior: any failure
//! that does not match a denial phrase counts as "candidate absent", so a
//! real privileged setter whose dry run fails for an unrelated reason
//! (bad gas estimate, odd node phrasing) classifies the contract as
//! immutable.

use rayon::prelude::*;
use tracing::debug;

use crate::config::ResolverConfig;
use crate::contract::ContractHandle;
use crate::record::MutabilityVerdict;
use crate::rpc::RpcError;

/// Probe every candidate concurrently and commit to a verdict.
///
/// All probes settle before the verdict is computed; completion order is
/// irrelevant because the tie-break is the candidate list order. Never
/// mutates chain state, and never returns [`MutabilityVerdict::Unknown`].
pub fn probe(handle: &ContractHandle, config: &ResolverConfig) -> MutabilityVerdict {
    let restricted: Vec<bool> = config
        .mutator_candidates
        .par_iter()
        .map(|candidate| {
            match handle.estimate_mutator(candidate) {
                Err(RpcError::Execution(message))
                    if is_authorization_denial(&message, &config.denial_phrases) =>
                {
                    debug!(%candidate, %message, "candidate present but restricted");
                    true
                }
                outcome => {
                    debug!(%candidate, ?outcome, "candidate absent or inconclusive");
                    false
                }
            }
        })
        .collect();

    for (candidate, gated) in config.mutator_candidates.iter().zip(restricted) {
        if gated {
            return MutabilityVerdict::ChangeableBy(candidate.clone());
        }
    }
    MutabilityVerdict::Immutable
}

fn is_authorization_denial(message: &str, phrases: &[String]) -> bool {
    phrases.iter().any(|phrase| message.contains(phrase.as_str()))
}
