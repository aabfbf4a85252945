use std::time::Instant;

use fin4_blockchain::uint;
use fin4_domain::{Collection, StoreCommand};
use futures::future::try_join_all;

use super::{Aggregator, Pipeline, SatelliteContracts};
use crate::error::AggregationError;

impl Aggregator {
    pub async fn fetch_collections(
        &self,
        satellites: &SatelliteContracts,
    ) -> Result<Vec<Collection>, AggregationError> {
        let started = Instant::now();
        let result = self.read_collections(satellites).await;
        self.conclude(Pipeline::Collections, started, result, StoreCommand::AddMultipleCollections)
    }

    async fn read_collections(
        &self,
        satellites: &SatelliteContracts,
    ) -> Result<Vec<Collection>, AggregationError> {
        let collections = &satellites.collections;
        let count = self
            .read(collections, "getCollectionsCount", ())
            .await?
            .u64(0)?;

        try_join_all((0..count).map(|collection_id| async move {
            let row = self
                .read(collections, "getCollection", uint(collection_id))
                .await?;
            Ok(Collection {
                collection_id,
                user_is_creator: row.bool(0)?,
                user_is_admin: row.bool(1)?,
                admin_group_is_set: row.bool(2)?,
                admin_group_id: row.u64(3)?,
                tokens: row.addresses(4)?,
                name: row.string(5)?,
                identifier: row.string(6)?,
                description: row.string(7)?,
            })
        }))
        .await
    }
}
