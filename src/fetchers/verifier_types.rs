use std::time::Instant;

use fin4_domain::{StoreCommand, VerifierType};
use futures::future::try_join_all;

use super::{Aggregator, Pipeline, SatelliteContracts};
use crate::error::AggregationError;

/// Interface of verifier types that ship no artifact of their own.
const BASE_VERIFIER_INTERFACE: &str = "Fin4BaseVerifierType";

impl Aggregator {
    /// Lists verifier types and registers a binding for each, named after the
    /// verifier type.
    pub async fn fetch_verifier_types(
        &self,
        satellites: &SatelliteContracts,
    ) -> Result<Vec<VerifierType>, AggregationError> {
        let started = Instant::now();
        let result = self.read_verifier_types(satellites).await;
        self.conclude(
            Pipeline::VerifierTypes,
            started,
            result,
            StoreCommand::AddMultipleVerifierTypes,
        )
    }

    async fn read_verifier_types(
        &self,
        satellites: &SatelliteContracts,
    ) -> Result<Vec<VerifierType>, AggregationError> {
        let verifying = &satellites.verifying;
        let addresses = self
            .read(verifying, "getVerifierTypes", ())
            .await?
            .addresses(0)?;

        try_join_all(addresses.into_iter().map(|address| async move {
            let row = self.read(verifying, "getVerifierTypeInfo", address).await?;
            let label = row.string(0)?;

            let interface = if self.catalog.contains(&label) {
                label.as_str()
            } else {
                BASE_VERIFIER_INTERFACE
            };
            self.register(&label, interface, address, &[])?;

            Ok(VerifierType {
                address,
                label,
                description: row.string(1)?,
                params_encoded: row.text(2)?,
                is_noninteractive: row.bool(3)?,
            })
        }))
        .await
    }
}
