use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// `Fin4Messaging.MessageType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageType {
    Info,
    Approval,
    UserToUser,
    Unknown(u64),
}

impl From<u64> for MessageType {
    fn from(code: u64) -> Self {
        match code {
            0 => MessageType::Info,
            1 => MessageType::Approval,
            2 => MessageType::UserToUser,
            other => MessageType::Unknown(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub message_id: u64,
    pub message_type: MessageType,
    pub sender: Address,
    pub verifier_type_name: String,
    pub message: String,
    pub has_been_acted_upon: bool,
    pub attachment: String,
    pub pending_approval_id: u64,
}

/// A message as held by the store.
///
/// Event-driven notifications only carry the message id; such stubs stay
/// untyped until a follow-up `getMyMessage` read resolves them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum MessageRecord {
    Resolved(Message),
    #[serde(rename_all = "camelCase")]
    Stub { message_id: u64 },
}

impl MessageRecord {
    pub fn message_id(&self) -> u64 {
        match self {
            MessageRecord::Resolved(message) => message.message_id,
            MessageRecord::Stub { message_id } => *message_id,
        }
    }

    pub fn is_stub(&self) -> bool {
        matches!(self, MessageRecord::Stub { .. })
    }
}
