use std::{sync::Arc, time::Instant};

use fin4_blockchain::{ContractBinding, ContractName};

use super::{Aggregator, Pipeline};
use crate::error::AggregationError;

/// Bindings published by `Fin4Main.getSatelliteAddresses`.
///
/// Only obtainable through [`Aggregator::discover_satellites`], so holding one
/// proves the satellites are registered.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct SatelliteContracts {
    pub uncapped_token_creator: Arc<ContractBinding>,
    pub capped_token_creator: Arc<ContractBinding>,
    pub token_management: Arc<ContractBinding>,
    pub claiming: Arc<ContractBinding>,
    pub collections: Arc<ContractBinding>,
    pub messaging: Arc<ContractBinding>,
    pub verifying: Arc<ContractBinding>,
    pub groups: Arc<ContractBinding>,
    pub system_parameters: Arc<ContractBinding>,
    pub voting: Arc<ContractBinding>,
}

/// Bindings published by `Fin4Main.getTCRaddresses`.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct TcrContracts {
    pub rep: Arc<ContractBinding>,
    pub gov: Arc<ContractBinding>,
    pub registry: Arc<ContractBinding>,
    pub plcr_voting: Arc<ContractBinding>,
    pub parameterizer: Arc<ContractBinding>,
}

impl Aggregator {
    pub async fn discover_satellites(&self) -> Result<SatelliteContracts, AggregationError> {
        let started = Instant::now();
        let result = self.register_published(&ContractName::SATELLITES, "getSatelliteAddresses").await;
        let bindings = self.observe(Pipeline::SatelliteDiscovery, started, result, Vec::len)?;

        let [
            uncapped_token_creator,
            capped_token_creator,
            token_management,
            claiming,
            collections,
            messaging,
            verifying,
            groups,
            system_parameters,
            voting,
        ]: [Arc<ContractBinding>; 10] = bindings
            .try_into()
            .map_err(|v: Vec<_>| output_count("getSatelliteAddresses", 10, v.len()))?;

        Ok(SatelliteContracts {
            uncapped_token_creator,
            capped_token_creator,
            token_management,
            claiming,
            collections,
            messaging,
            verifying,
            groups,
            system_parameters,
            voting,
        })
    }

    pub async fn discover_tcr(&self) -> Result<TcrContracts, AggregationError> {
        let started = Instant::now();
        let result = self.register_published(&ContractName::TCR, "getTCRaddresses").await;
        let bindings = self.observe(Pipeline::TcrDiscovery, started, result, Vec::len)?;

        let [rep, gov, registry, plcr_voting, parameterizer]: [Arc<ContractBinding>; 5] = bindings
            .try_into()
            .map_err(|v: Vec<_>| output_count("getTCRaddresses", 5, v.len()))?;

        Ok(TcrContracts {
            rep,
            gov,
            registry,
            plcr_voting,
            parameterizer,
        })
    }

    /// Reads the addresses `Fin4Main` publishes through `method` and registers
    /// them under `names`, position by position.
    async fn register_published(
        &self,
        names: &[ContractName],
        method: &str,
    ) -> Result<Vec<Arc<ContractBinding>>, AggregationError> {
        let row = self.read(&self.main, method, ()).await?;
        if row.len() != names.len() {
            return Err(output_count(method, names.len(), row.len()));
        }

        let mut bindings = Vec::with_capacity(names.len());
        for (index, name) in names.iter().enumerate() {
            let address = row.address(index)?;
            let binding =
                self.register(name.as_str(), name.as_str(), address, name.monitored_events())?;
            bindings.push(binding);
        }
        Ok(bindings)
    }
}

fn output_count(method: &str, expected: usize, actual: usize) -> AggregationError {
    AggregationError::UnexpectedOutputCount {
        method: method.to_string(),
        expected,
        actual,
    }
}
