use std::time::Instant;

use fin4_blockchain::uint;
use fin4_domain::{StoreCommand, Submission};
use futures::future::try_join_all;

use super::{Aggregator, Pipeline, SatelliteContracts};
use crate::error::AggregationError;

impl Aggregator {
    /// Every proof submission recorded by `Fin4Verifying`.
    pub async fn fetch_submissions(
        &self,
        satellites: &SatelliteContracts,
    ) -> Result<Vec<Submission>, AggregationError> {
        let started = Instant::now();
        let result = self.read_submissions(satellites).await;
        self.conclude(Pipeline::Submissions, started, result, StoreCommand::AddMultipleSubmissions)
    }

    async fn read_submissions(
        &self,
        satellites: &SatelliteContracts,
    ) -> Result<Vec<Submission>, AggregationError> {
        let verifying = &satellites.verifying;
        let count = self
            .read(verifying, "getSubmissionsCount", ())
            .await?
            .u64(0)?;

        try_join_all((0..count).map(|index| async move {
            let row = self.read(verifying, "submissions", uint(index)).await?;
            Ok(Submission {
                submission_id: row.u64(0)?,
                verifier_type: row.address(1)?,
                token: row.address(2)?,
                user: row.address(3)?,
                timestamp: row.u64(4)?,
                content_type: row.u64(5)?,
                content: row.string(6)?,
            })
        }))
        .await
    }
}
