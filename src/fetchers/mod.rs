//! Aggregation pipelines: list/count read, concurrent per-item detail reads,
//! normalization, then a single bulk dispatch.
//!
//! A pipeline either dispatches everything it read or nothing at all.
//! Contract registrations made along the way stay in place on failure.

mod claims;
mod collections;
mod discovery;
mod loader;
mod messages;
mod parameters;
mod submissions;
mod tcr;
mod tokens;
mod verifier_types;

use std::{fmt, sync::Arc, time::Instant};

use alloy::primitives::Address;
use fin4_blockchain::{
    BlockchainError, CallParams, ContractBinding, ContractCaller, ContractRegistry,
    InterfaceCatalog, OutputRow,
};
use fin4_domain::{StoreCommand, StoreDispatcher};

pub use claims::normalize_claim;
pub use discovery::{SatelliteContracts, TcrContracts};
pub use loader::{LoadReport, PipelineFailure};
pub use parameters::PARAMETERIZER_PARAMS;

use crate::error::AggregationError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pipeline {
    SatelliteDiscovery,
    TcrDiscovery,
    Tokens,
    Balances,
    Underlyings,
    Claims,
    Messages,
    StubMessages,
    Collections,
    Submissions,
    VerifierTypes,
    SystemParameters,
    ParameterizerParams,
    Opats,
    GovernanceBalances,
    PollStatus,
}

impl Pipeline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pipeline::SatelliteDiscovery => "satellite_discovery",
            Pipeline::TcrDiscovery => "tcr_discovery",
            Pipeline::Tokens => "tokens",
            Pipeline::Balances => "balances",
            Pipeline::Underlyings => "underlyings",
            Pipeline::Claims => "claims",
            Pipeline::Messages => "messages",
            Pipeline::StubMessages => "stub_messages",
            Pipeline::Collections => "collections",
            Pipeline::Submissions => "submissions",
            Pipeline::VerifierTypes => "verifier_types",
            Pipeline::SystemParameters => "system_parameters",
            Pipeline::ParameterizerParams => "parameterizer_params",
            Pipeline::Opats => "opats",
            Pipeline::GovernanceBalances => "governance_balances",
            Pipeline::PollStatus => "poll_status",
        }
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads on-chain state into store records on behalf of `account`.
#[derive(Clone)]
pub struct Aggregator {
    caller: ContractCaller,
    catalog: Arc<InterfaceCatalog>,
    store: StoreDispatcher,
    main: Arc<ContractBinding>,
    account: Address,
}

impl Aggregator {
    /// `main` is the registered `Fin4Main` binding every discovery starts from.
    pub fn new(
        caller: ContractCaller,
        catalog: Arc<InterfaceCatalog>,
        store: StoreDispatcher,
        main: Arc<ContractBinding>,
        account: Address,
    ) -> Self {
        Self {
            caller,
            catalog,
            store,
            main,
            account,
        }
    }

    pub fn account(&self) -> Address {
        self.account
    }

    pub fn registry(&self) -> &Arc<ContractRegistry> {
        self.caller.registry()
    }

    async fn read(
        &self,
        binding: &Arc<ContractBinding>,
        method: &str,
        params: impl Into<CallParams>,
    ) -> Result<OutputRow, AggregationError> {
        Ok(self
            .caller
            .query_binding(self.account, binding, method, params)
            .await?)
    }

    /// Registers `address` under `name` with the interface of the same name.
    fn register(
        &self,
        name: &str,
        interface_name: &str,
        address: Address,
        events: &[&str],
    ) -> Result<Arc<ContractBinding>, BlockchainError> {
        let interface = self.catalog.get(interface_name)?;
        self.registry().register(name, address, interface, events)
    }

    /// Records the run and, on success, dispatches the bulk command built from the records.
    fn conclude<T: Clone>(
        &self,
        pipeline: Pipeline,
        started: Instant,
        result: Result<Vec<T>, AggregationError>,
        command: impl FnOnce(Vec<T>) -> StoreCommand,
    ) -> Result<Vec<T>, AggregationError> {
        let records = self.observe(pipeline, started, result, Vec::len)?;
        self.store.dispatch(command(records.clone()));
        Ok(records)
    }

    /// Records the run without dispatching.
    fn observe<T>(
        &self,
        pipeline: Pipeline,
        started: Instant,
        result: Result<T, AggregationError>,
        count: impl FnOnce(&T) -> usize,
    ) -> Result<T, AggregationError> {
        let elapsed = started.elapsed();
        match &result {
            Ok(records) => {
                let records = count(records);
                tracing::debug!(
                    pipeline = pipeline.as_str(),
                    records,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Aggregation finished"
                );
                fin4_observability::record_aggregation_run(pipeline.as_str(), "ok", elapsed, records);
            }
            Err(error) => {
                tracing::warn!(
                    pipeline = pipeline.as_str(),
                    error = %error,
                    "Aggregation failed; nothing dispatched"
                );
                fin4_observability::record_aggregation_run(pipeline.as_str(), "error", elapsed, 0);
            }
        }
        result
    }
}
