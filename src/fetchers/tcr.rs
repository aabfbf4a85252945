use std::{sync::Arc, time::Instant};

use alloy::primitives::Address;
use chrono::{DateTime, Utc};
use fin4_blockchain::{ContractBinding, uint};
use fin4_domain::{PollStatus, StoreCommand, TokenBalance, poll_status};
use futures::future::try_join;

use super::{Aggregator, Pipeline, TcrContracts};
use crate::error::AggregationError;

impl Aggregator {
    /// Marks every token whitelisted in the TCR registry as an OPAT.
    ///
    /// The listing key of a token is its address left-padded to 32 bytes.
    pub async fn fetch_opats(&self, tcr: &TcrContracts) -> Result<Vec<Address>, AggregationError> {
        let started = Instant::now();
        let result: Result<Vec<Address>, AggregationError> = async {
            let keys = self
                .read(&tcr.registry, "getWhitelistedListingKeys", ())
                .await?
                .bytes32_list(0)?;
            Ok(keys
                .iter()
                .map(|key| Address::from_slice(&key[12..]))
                .collect())
        }
        .await;

        let tokens = self.observe(Pipeline::Opats, started, result, Vec::len)?;
        for token_address in &tokens {
            self.store.dispatch(StoreCommand::MarkFin4TokenAsOpat {
                token_address: *token_address,
            });
        }
        Ok(tokens)
    }

    /// REP and GOV balances of the account.
    pub async fn fetch_governance_balances(
        &self,
        tcr: &TcrContracts,
    ) -> Result<[TokenBalance; 2], AggregationError> {
        let started = Instant::now();
        let result = try_join(
            self.governance_balance(&tcr.rep),
            self.governance_balance(&tcr.gov),
        )
        .await
        .map(|(rep, gov)| [rep, gov]);

        let balances = self.observe(Pipeline::GovernanceBalances, started, result, |b| b.len())?;
        for balance in &balances {
            self.store
                .dispatch(StoreCommand::UpdateGovernanceBalance(balance.clone()));
        }
        Ok(balances)
    }

    async fn governance_balance(
        &self,
        token: &Arc<ContractBinding>,
    ) -> Result<TokenBalance, AggregationError> {
        let balance = self
            .read(token, "balanceOf", self.account)
            .await?
            .u128(0)?;
        Ok(TokenBalance {
            token_address: token.address(),
            balance,
        })
    }

    /// Voting period of a PLCR poll (a registry challenge) right now.
    pub async fn fetch_poll_status(
        &self,
        tcr: &TcrContracts,
        poll_id: u64,
    ) -> Result<PollStatus, AggregationError> {
        self.fetch_poll_status_at(tcr, poll_id, Utc::now()).await
    }

    pub async fn fetch_poll_status_at(
        &self,
        tcr: &TcrContracts,
        poll_id: u64,
        now: DateTime<Utc>,
    ) -> Result<PollStatus, AggregationError> {
        let started = Instant::now();
        let result: Result<PollStatus, AggregationError> = async {
            let row = self.read(&tcr.plcr_voting, "pollMap", uint(poll_id)).await?;
            let commit_end = timestamp(row.u64(0)?)?;
            let reveal_end = timestamp(row.u64(1)?)?;
            Ok(poll_status(commit_end, reveal_end, now))
        }
        .await;

        self.observe(Pipeline::PollStatus, started, result, |_| 1)
    }
}

fn timestamp(seconds: u64) -> Result<DateTime<Utc>, AggregationError> {
    i64::try_from(seconds)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .ok_or(AggregationError::InvalidTimestamp { value: seconds })
}
