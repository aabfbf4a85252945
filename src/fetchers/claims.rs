use std::{collections::BTreeMap, time::Instant};

use alloy::primitives::Address;
use fin4_blockchain::OutputRow;
use fin4_domain::{Claim, StoreCommand, VerifierStatus};
use futures::future::try_join_all;

use super::{Aggregator, Pipeline, SatelliteContracts};
use crate::error::AggregationError;

impl Aggregator {
    /// Claims of the account across all tokens it has claimed on.
    ///
    /// Claim ids repeat across tokens, so records are keyed by `<token>_<claimId>`.
    pub async fn fetch_claims(
        &self,
        satellites: &SatelliteContracts,
    ) -> Result<Vec<Claim>, AggregationError> {
        let started = Instant::now();
        let result = self.read_claims(satellites).await;
        self.conclude(Pipeline::Claims, started, result, StoreCommand::AddMultipleClaims)
    }

    async fn read_claims(
        &self,
        satellites: &SatelliteContracts,
    ) -> Result<Vec<Claim>, AggregationError> {
        let claiming = &satellites.claiming;
        let tokens = self
            .read(claiming, "getTokensWhereUserHasClaims", ())
            .await?
            .addresses(0)?;

        let ids_per_token = try_join_all(tokens.into_iter().map(|token| async move {
            let ids = self
                .read(claiming, "getMyClaimIdsOnThisToken", token)
                .await?
                .u64s(0)?;
            Ok::<_, AggregationError>((token, ids))
        }))
        .await?;

        let pairs = ids_per_token
            .into_iter()
            .flat_map(|(token, ids)| ids.into_iter().map(move |id| (token, id)));

        try_join_all(pairs.map(|(token, claim_id)| async move {
            let row = self
                .read(
                    claiming,
                    "getClaimOnThisToken",
                    vec![token.into(), fin4_blockchain::uint(claim_id)],
                )
                .await?;
            normalize_claim(token, claim_id, &row)
        }))
        .await
    }
}

/// Builds a [`Claim`] from a `getClaimOnThisToken` row.
///
/// The status array is matched to the required verifier types by position; a
/// status array shorter than the type list is rejected.
pub fn normalize_claim(
    token: Address,
    claim_id: u64,
    row: &OutputRow,
) -> Result<Claim, AggregationError> {
    let required = row.addresses(6)?;
    let statuses = row.u64s(7)?;
    if statuses.len() < required.len() {
        return Err(AggregationError::VerifierStatusMismatch {
            token,
            claim_id,
            required: required.len(),
            statuses: statuses.len(),
        });
    }

    let verifier_statuses: BTreeMap<Address, VerifierStatus> = required
        .into_iter()
        .zip(statuses)
        .map(|(verifier, status)| {
            (
                verifier,
                VerifierStatus {
                    status,
                    message: String::new(),
                },
            )
        })
        .collect();

    let verifiers_with_messages = row
        .addresses(8)?
        .into_iter()
        .filter(|verifier| !verifier.is_zero())
        .collect();

    Ok(Claim {
        id: Claim::pseudo_id(&token, claim_id),
        token,
        claim_id,
        claimer: row.address(0)?,
        is_approved: row.bool(1)?,
        got_rejected: row.bool(2)?,
        quantity: row.u128(3)?,
        claim_creation_time: row.u64(4)?,
        comment: row.string(5)?,
        verifier_statuses,
        verifiers_with_messages,
    })
}
