use std::time::Instant;

use fin4_blockchain::uint;
use fin4_domain::{Message, MessageRecord, MessageType, StoreCommand};
use futures::future::try_join_all;

use super::{Aggregator, Pipeline, SatelliteContracts};
use crate::error::AggregationError;

impl Aggregator {
    /// All messages addressed to the account.
    pub async fn fetch_messages(
        &self,
        satellites: &SatelliteContracts,
    ) -> Result<Vec<MessageRecord>, AggregationError> {
        let started = Instant::now();
        let result = self.read_messages(satellites).await;
        self.conclude(Pipeline::Messages, started, result, StoreCommand::AddMultipleMessages)
    }

    async fn read_messages(
        &self,
        satellites: &SatelliteContracts,
    ) -> Result<Vec<MessageRecord>, AggregationError> {
        let count = self
            .read(&satellites.messaging, "getMyMessagesCount", ())
            .await?
            .u64(0)?;

        try_join_all((0..count).map(|message_id| async move {
            self.fetch_message(satellites, message_id)
                .await
                .map(MessageRecord::Resolved)
        }))
        .await
    }

    /// Reads one message without dispatching it.
    pub async fn fetch_message(
        &self,
        satellites: &SatelliteContracts,
        message_id: u64,
    ) -> Result<Message, AggregationError> {
        let row = self
            .read(&satellites.messaging, "getMyMessage", uint(message_id))
            .await?;

        Ok(Message {
            message_id: row.u64(0)?,
            message_type: MessageType::from(row.u64(1)?),
            sender: row.address(2)?,
            verifier_type_name: row.string(3)?,
            message: row.string(4)?,
            has_been_acted_upon: row.bool(5)?,
            attachment: row.text(6)?,
            pending_approval_id: row.u64(7)?,
        })
    }

    /// Resolves every stub among `records` and dispatches one update per message.
    ///
    /// Updates are only dispatched once all stubs resolved.
    pub async fn refresh_stub_messages(
        &self,
        satellites: &SatelliteContracts,
        records: &[MessageRecord],
    ) -> Result<Vec<Message>, AggregationError> {
        let started = Instant::now();
        let stubs = records
            .iter()
            .filter(|record| record.is_stub())
            .map(MessageRecord::message_id);
        let result = try_join_all(stubs.map(|id| self.fetch_message(satellites, id))).await;

        let messages = self.observe(Pipeline::StubMessages, started, result, Vec::len)?;
        for message in &messages {
            self.store
                .dispatch(StoreCommand::UpdateStubMessage(message.clone()));
        }
        Ok(messages)
    }
}
