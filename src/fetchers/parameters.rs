use std::time::Instant;

use fin4_domain::{ParameterizerParam, StoreCommand, SystemParameter};

use super::{Aggregator, Pipeline, SatelliteContracts, TcrContracts};
use crate::error::AggregationError;

/// Names and descriptions of the values returned by `Parameterizer.getAll`, in order.
pub const PARAMETERIZER_PARAMS: [(&str, &str); 14] = [
    ("minDeposit", "Minimum deposit for a listing application"),
    ("pMinDeposit", "Minimum deposit for a parameter proposal"),
    ("applyStageLen", "Length of the listing application period"),
    ("pApplyStageLen", "Length of the parameter proposal application period"),
    ("commitStageLen", "Length of the commit period for listing votes"),
    ("pCommitStageLen", "Length of the commit period for parameter votes"),
    ("revealStageLen", "Length of the reveal period for listing votes"),
    ("pRevealStageLen", "Length of the reveal period for parameter votes"),
    ("dispensationPct", "Share of a loser's stake awarded to the winner of a listing challenge"),
    ("pDispensationPct", "Share of a loser's stake awarded to the winner of a parameter challenge"),
    ("voteQuorum", "Share of votes needed for a listing challenge to fail"),
    ("pVoteQuorum", "Share of votes needed for a parameter proposal to pass"),
    ("exitTimeDelay", "Waiting time before a listing can be exited"),
    ("exitPeriodLen", "Window in which an initialized exit can be completed"),
];

const REP_FOR_TOKEN_CREATION: &str = "REPforTokenCreation";
const REP_FOR_TOKEN_CLAIM: &str = "REPforTokenClaim";

impl Aggregator {
    /// Reads the REP thresholds and dispatches one update per parameter.
    pub async fn fetch_system_parameters(
        &self,
        satellites: &SatelliteContracts,
    ) -> Result<Vec<SystemParameter>, AggregationError> {
        let started = Instant::now();
        let result: Result<Vec<SystemParameter>, AggregationError> = async {
            let row = self
                .read(&satellites.system_parameters, "getSystemParameters", ())
                .await?;
            Ok(vec![
                SystemParameter {
                    name: REP_FOR_TOKEN_CREATION.to_string(),
                    value: row.u64(0)?,
                },
                SystemParameter {
                    name: REP_FOR_TOKEN_CLAIM.to_string(),
                    value: row.u64(1)?,
                },
            ])
        }
        .await;

        let parameters = self.observe(Pipeline::SystemParameters, started, result, Vec::len)?;
        for parameter in &parameters {
            self.store
                .dispatch(StoreCommand::SetSystemParameter(parameter.clone()));
        }
        Ok(parameters)
    }

    pub async fn fetch_parameterizer_params(
        &self,
        tcr: &TcrContracts,
    ) -> Result<Vec<ParameterizerParam>, AggregationError> {
        let started = Instant::now();
        let result: Result<Vec<ParameterizerParam>, AggregationError> = async {
            let row = self.read(&tcr.parameterizer, "getAll", ()).await?;
            let values = row.u64s(0)?;
            if values.len() != PARAMETERIZER_PARAMS.len() {
                return Err(AggregationError::LengthMismatch {
                    method: row.method().to_string(),
                    left: PARAMETERIZER_PARAMS.len(),
                    right: values.len(),
                });
            }
            Ok(PARAMETERIZER_PARAMS
                .iter()
                .zip(values)
                .map(|((name, description), value)| ParameterizerParam {
                    name: name.to_string(),
                    description: description.to_string(),
                    value,
                })
                .collect())
        }
        .await;

        self.conclude(
            Pipeline::ParameterizerParams,
            started,
            result,
            StoreCommand::SetParameterizerParams,
        )
    }
}
