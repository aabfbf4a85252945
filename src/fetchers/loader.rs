use futures::future::join_all;

use super::{Aggregator, Pipeline, SatelliteContracts, TcrContracts};
use crate::error::AggregationError;

#[derive(Debug)]
pub struct PipelineFailure {
    pub pipeline: Pipeline,
    pub error: AggregationError,
}

/// Outcome of the initial data load. Pipelines fail independently.
#[derive(Debug)]
pub struct LoadReport {
    pub satellites: Option<SatelliteContracts>,
    pub tcr: Option<TcrContracts>,
    pub succeeded: Vec<Pipeline>,
    pub failures: Vec<PipelineFailure>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn record<T>(&mut self, pipeline: Pipeline, result: Result<T, AggregationError>) -> Option<T> {
        match result {
            Ok(value) => {
                self.succeeded.push(pipeline);
                Some(value)
            }
            Err(error) => {
                tracing::warn!(pipeline = pipeline.as_str(), error = %error, "Pipeline failed");
                self.failures.push(PipelineFailure { pipeline, error });
                None
            }
        }
    }
}

type PipelineResults = Vec<(Pipeline, Result<(), AggregationError>)>;
type PipelineRun<'a> = std::pin::Pin<Box<dyn Future<Output = PipelineResults> + Send + 'a>>;

fn run<'a, T>(
    pipeline: Pipeline,
    fut: impl Future<Output = Result<T, AggregationError>> + Send + 'a,
) -> PipelineRun<'a> {
    Box::pin(async move { vec![(pipeline, fut.await.map(|_| ()))] })
}

impl Aggregator {
    /// Discovers the satellite and TCR contracts, then runs every dependent
    /// pipeline concurrently.
    ///
    /// Token listing runs before OPAT marking so the marks land on known tokens.
    pub async fn load_initial_data(&self) -> LoadReport {
        let mut report = LoadReport {
            satellites: None,
            tcr: None,
            succeeded: Vec::new(),
            failures: Vec::new(),
        };

        let (satellites, tcr) =
            futures::join!(self.discover_satellites(), self.discover_tcr());
        let satellites = report.record(Pipeline::SatelliteDiscovery, satellites);
        let tcr = report.record(Pipeline::TcrDiscovery, tcr);

        let mut runs: Vec<PipelineRun<'_>> = Vec::new();
        if let Some(satellites) = &satellites {
            let tcr = tcr.as_ref();
            runs.push(Box::pin(async move {
                let tokens = self.fetch_tokens(satellites).await.map(|_| ());
                let tokens_ok = tokens.is_ok();
                let mut results = vec![(Pipeline::Tokens, tokens)];
                if let (true, Some(tcr)) = (tokens_ok, tcr) {
                    results.push((Pipeline::Opats, self.fetch_opats(tcr).await.map(|_| ())));
                }
                results
            }));
            runs.push(run(Pipeline::Balances, self.fetch_nonzero_balances(satellites)));
            runs.push(run(Pipeline::Underlyings, self.fetch_underlyings(satellites)));
            runs.push(run(Pipeline::Claims, self.fetch_claims(satellites)));
            runs.push(run(Pipeline::Messages, self.fetch_messages(satellites)));
            runs.push(run(Pipeline::Collections, self.fetch_collections(satellites)));
            runs.push(run(Pipeline::Submissions, self.fetch_submissions(satellites)));
            runs.push(run(Pipeline::VerifierTypes, self.fetch_verifier_types(satellites)));
            runs.push(run(Pipeline::SystemParameters, self.fetch_system_parameters(satellites)));
        }
        if let Some(tcr) = &tcr {
            runs.push(run(Pipeline::ParameterizerParams, self.fetch_parameterizer_params(tcr)));
            runs.push(run(Pipeline::GovernanceBalances, self.fetch_governance_balances(tcr)));
        }

        for (pipeline, result) in join_all(runs).await.into_iter().flatten() {
            report.record(pipeline, result);
        }

        tracing::info!(
            succeeded = report.succeeded.len(),
            failed = report.failures.len(),
            "Initial data load finished"
        );

        report.satellites = satellites;
        report.tcr = tcr;
        report
    }
}
