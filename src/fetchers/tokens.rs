use std::time::Instant;

use alloy::primitives::Address;
use fin4_blockchain::OutputRow;
use fin4_domain::{StoreCommand, Token, TokenBalance, Underlying};
use futures::future::try_join_all;

use super::{Aggregator, Pipeline, SatelliteContracts};
use crate::error::AggregationError;

impl Aggregator {
    /// Every Fin4 token with its details.
    pub async fn fetch_tokens(
        &self,
        satellites: &SatelliteContracts,
    ) -> Result<Vec<Token>, AggregationError> {
        let started = Instant::now();
        let result = self.read_tokens(satellites).await;
        self.conclude(Pipeline::Tokens, started, result, StoreCommand::AddMultipleFin4Tokens)
    }

    async fn read_tokens(
        &self,
        satellites: &SatelliteContracts,
    ) -> Result<Vec<Token>, AggregationError> {
        let management = &satellites.token_management;
        let addresses = self.read(management, "getAllFin4Tokens", ()).await?.addresses(0)?;

        try_join_all(addresses.into_iter().map(|address| async move {
            let row = self.read(management, "getTokenInfo", address).await?;
            normalize_token(address, &row)
        }))
        .await
    }

    /// Tokens the account holds a nonzero balance of. Nothing is dispatched
    /// when there are none.
    pub async fn fetch_nonzero_balances(
        &self,
        satellites: &SatelliteContracts,
    ) -> Result<Vec<TokenBalance>, AggregationError> {
        let started = Instant::now();
        let result = self.read_nonzero_balances(satellites).await;
        let balances = self.observe(Pipeline::Balances, started, result, Vec::len)?;
        if !balances.is_empty() {
            self.store
                .dispatch(StoreCommand::UpdateMultipleBalances(balances.clone()));
        }
        Ok(balances)
    }

    async fn read_nonzero_balances(
        &self,
        satellites: &SatelliteContracts,
    ) -> Result<Vec<TokenBalance>, AggregationError> {
        let row = self
            .read(&satellites.token_management, "getMyNonzeroTokenBalances", ())
            .await?;
        let tokens = row.addresses(0)?;
        let balances = row.u128s(1)?;
        if tokens.len() != balances.len() {
            return Err(AggregationError::LengthMismatch {
                method: row.method().to_string(),
                left: tokens.len(),
                right: balances.len(),
            });
        }

        Ok(tokens
            .into_iter()
            .zip(balances)
            .map(|(token_address, balance)| TokenBalance {
                token_address,
                balance,
            })
            .collect())
    }

    /// All underlyings known to token management, by title.
    pub async fn fetch_underlyings(
        &self,
        satellites: &SatelliteContracts,
    ) -> Result<Vec<Underlying>, AggregationError> {
        let started = Instant::now();
        let result: Result<Vec<Underlying>, AggregationError> = async {
            let row = self
                .read(&satellites.token_management, "getUnderlyings", ())
                .await?;
            Ok(row
                .text_list(0)?
                .into_iter()
                .map(|title| Underlying { title })
                .collect())
        }
        .await;
        self.conclude(Pipeline::Underlyings, started, result, StoreCommand::SetUnderlyings)
    }
}

fn normalize_token(address: Address, row: &OutputRow) -> Result<Token, AggregationError> {
    Ok(Token {
        address,
        user_is_creator: row.bool(0)?,
        name: row.string(1)?,
        symbol: row.string(2)?,
        description: row.string(3)?,
        unit: row.string(4)?,
        total_supply: row.u128(5)?,
        creation_time: row.u64(6)?,
        has_fixed_minting_quantity: row.bool(7)?,
        is_opat: None,
        underlyings: row.text_list(8)?,
    })
}
