use std::num::NonZeroUsize;

use alloy::{
    network::Ethereum,
    primitives::{Address, B256, Bytes, U256},
    providers::{DynProvider, Provider, ProviderBuilder, WsConnect},
    rpc::{client::RpcClient, types::TransactionRequest as AlloyTransactionRequest},
    transports::{
        BoxTransport, IntoBoxTransport, RpcError, TransportErrorKind,
        http::{Http, reqwest::Url},
        layers::FallbackLayer,
    },
};
use async_trait::async_trait;
use tower::ServiceBuilder;

use crate::BlockchainError;

/// Read-only invocation against current chain state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRequest {
    pub from: Address,
    pub to: Address,
    pub data: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    pub from: Address,
    pub to: Address,
    pub data: Bytes,
    pub value: Option<U256>,
    pub gas: Option<u64>,
}

/// Error returned by the RPC provider.
///
/// `message` is the provider's textual rendering; `revert_data` is set when
/// the node attached ABI-encoded revert data to the error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ProviderError {
    message: String,
    revert_data: Option<Bytes>,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            revert_data: None,
        }
    }

    pub fn with_revert_data(mut self, data: Bytes) -> Self {
        self.revert_data = Some(data);
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn revert_data(&self) -> Option<&Bytes> {
        self.revert_data.as_ref()
    }

}

impl From<RpcError<TransportErrorKind>> for ProviderError {
    /// Keeps the `Error(string)` / `Panic(uint256)` payload of a JSON-RPC error response.
    fn from(err: RpcError<TransportErrorKind>) -> Self {
        let revert_data = err
            .as_error_resp()
            .and_then(|payload| payload.as_revert_data());
        Self {
            message: err.to_string(),
            revert_data,
        }
    }
}

/// The RPC provider boundary used by every chain interaction.
#[async_trait]
pub trait RpcProvider: Send + Sync {
    async fn call(&self, request: CallRequest) -> Result<Bytes, ProviderError>;

    /// Hands a transaction to the provider for signing and broadcast.
    async fn send_transaction(&self, request: TransactionRequest) -> Result<B256, ProviderError>;
}

/// `RpcProvider` backed by an alloy provider. Signing is left to the node.
#[derive(Clone)]
pub struct AlloyRpcProvider {
    provider: DynProvider<Ethereum>,
}

impl AlloyRpcProvider {
    pub fn new(provider: DynProvider<Ethereum>) -> Self {
        Self { provider }
    }

    /// Connects to the given endpoints with automatic failover.
    /// Supports both HTTP and WebSocket endpoints.
    pub async fn connect(rpc_endpoints: &[String]) -> Result<Self, BlockchainError> {
        let mut transports: Vec<BoxTransport> = Vec::new();
        let mut valid_endpoints = Vec::new();

        for endpoint in rpc_endpoints {
            if endpoint.starts_with("ws://") || endpoint.starts_with("wss://") {
                let ws_connect = WsConnect::new(endpoint);
                match RpcClient::connect_pubsub(ws_connect).await {
                    Ok(client) => {
                        transports.push(client.transport().clone().into_box_transport());
                        valid_endpoints.push(endpoint.clone());
                        tracing::debug!("WebSocket RPC endpoint added: {}", endpoint);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to connect to WebSocket RPC '{}': {}", endpoint, e);
                    }
                }
            } else {
                match endpoint.parse::<Url>() {
                    Ok(url) => {
                        transports.push(Http::new(url).into_box_transport());
                        valid_endpoints.push(endpoint.clone());
                        tracing::debug!("HTTP RPC endpoint added: {}", endpoint);
                    }
                    Err(e) => {
                        tracing::warn!("Invalid RPC URL '{}': {}", endpoint, e);
                    }
                }
            }
        }

        if transports.is_empty() {
            return Err(BlockchainError::RpcConnectionFailed {
                attempts: rpc_endpoints.len(),
            });
        }

        // One transport at a time; fall back only on failure.
        let fallback_layer = FallbackLayer::default().with_active_transport_count(NonZeroUsize::MIN);
        let transport = ServiceBuilder::new()
            .layer(fallback_layer)
            .service(transports);
        let client = RpcClient::builder().transport(transport, false);
        let provider = ProviderBuilder::new().connect_client(client);

        match provider.get_block_number().await {
            Ok(block) => {
                tracing::info!(
                    "RPC provider initialized with {} endpoint(s) (block: {}): {:?}",
                    valid_endpoints.len(),
                    block,
                    valid_endpoints
                );
                Ok(Self::new(provider.erased()))
            }
            Err(e) => {
                tracing::error!("All RPC endpoints failed connectivity check: {}", e);
                Err(BlockchainError::RpcConnectionFailed {
                    attempts: valid_endpoints.len(),
                })
            }
        }
    }
}

#[async_trait]
impl RpcProvider for AlloyRpcProvider {
    async fn call(&self, request: CallRequest) -> Result<Bytes, ProviderError> {
        let tx = AlloyTransactionRequest::default()
            .from(request.from)
            .to(request.to)
            .input(request.data.into());

        self.provider.call(tx).await.map_err(ProviderError::from)
    }

    async fn send_transaction(&self, request: TransactionRequest) -> Result<B256, ProviderError> {
        let mut tx = AlloyTransactionRequest::default()
            .from(request.from)
            .to(request.to)
            .input(request.data.into());
        if let Some(value) = request.value {
            tx = tx.value(value);
        }
        if let Some(gas) = request.gas {
            tx = tx.gas_limit(gas);
        }

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(ProviderError::from)?;
        Ok(*pending.tx_hash())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_provider_message() {
        let err = ProviderError::new("execution reverted")
            .with_revert_data(Bytes::from_static(&[0x08, 0xc3, 0x79, 0xa0]));
        assert_eq!(err.to_string(), "execution reverted");
        assert_eq!(err.revert_data().map(|d| d.len()), Some(4));
    }

    #[test]
    fn rpc_error_response_keeps_revert_data() {
        let err = crate::testing::execution_reverted("Not enough REP");

        assert!(err.message().contains("execution reverted: Not enough REP"));
        let data = err.revert_data().expect("revert data kept");
        assert_eq!(&data[..4], &[0x08, 0xc3, 0x79, 0xa0]);
    }

    #[tokio::test]
    async fn connect_without_endpoints_fails() {
        let result = AlloyRpcProvider::connect(&[]).await;
        assert!(matches!(
            result,
            Err(BlockchainError::RpcConnectionFailed { attempts: 0 })
        ));
    }
}
