//! Scripted in-memory RPC provider for tests.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use alloy::{
    dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt},
    json_abi::Function,
    hex,
    primitives::{Address, B256, Bytes, Selector, keccak256},
    rpc::json_rpc::ErrorPayload,
    sol_types::{Revert, SolError},
    transports::{RpcError, TransportErrorKind},
};
use async_trait::async_trait;

use crate::{CallRequest, ContractBinding, ProviderError, RpcProvider, TransactionRequest};

type Handler = Arc<dyn Fn(&[DynSolValue]) -> Result<Vec<DynSolValue>, ProviderError> + Send + Sync>;

struct Route {
    function: Function,
    handler: Handler,
}

/// Answers `call` from handlers keyed by (contract address, selector) and
/// records every request it sees. Unscripted calls fail.
#[derive(Default)]
pub struct MockProvider {
    routes: Mutex<HashMap<(Address, Selector), Route>>,
    calls: Mutex<Vec<CallRequest>>,
    sent: Mutex<Vec<TransactionRequest>>,
    send_failure: Mutex<Option<ProviderError>>,
}

/// Error a node returns over JSON-RPC when `eth_call` hits `require(false, reason)`,
/// converted the way [`crate::AlloyRpcProvider`] converts it.
pub fn execution_reverted(reason: &str) -> ProviderError {
    let data = hex::encode_prefixed(Revert { reason: reason.to_string() }.abi_encode());
    let payload = serde_json::json!({
        "code": 3,
        "message": format!("execution reverted: {reason}"),
        "data": data,
    });
    let payload: ErrorPayload = match serde_json::from_str(&payload.to_string()) {
        Ok(payload) => payload,
        Err(error) => panic!("error payload does not deserialize: {error}"),
    };
    ProviderError::from(RpcError::<TransportErrorKind>::ErrorResp(payload))
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts `method` on `binding`. The handler receives the decoded inputs
    /// and returns the outputs to encode.
    pub fn respond<F>(&self, binding: &ContractBinding, method: &str, handler: F)
    where
        F: Fn(&[DynSolValue]) -> Result<Vec<DynSolValue>, ProviderError> + Send + Sync + 'static,
    {
        let Some(function) = binding.method(method) else {
            panic!("{} has no method {method}", binding.name());
        };
        self.route(binding.address(), function.clone(), handler);
    }

    /// Scripts `function` at `address` without a registered binding.
    pub fn route<F>(&self, address: Address, function: Function, handler: F)
    where
        F: Fn(&[DynSolValue]) -> Result<Vec<DynSolValue>, ProviderError> + Send + Sync + 'static,
    {
        lock(&self.routes).insert(
            (address, function.selector()),
            Route {
                function,
                handler: Arc::new(handler),
            },
        );
    }

    /// Makes `method` fail with `error` regardless of its inputs.
    pub fn fail(&self, binding: &ContractBinding, method: &str, error: ProviderError) {
        self.respond(binding, method, move |_| Err(error.clone()));
    }

    /// Every subsequent `send_transaction` fails with `error`.
    pub fn fail_sends_with(&self, error: ProviderError) {
        *lock(&self.send_failure) = Some(error);
    }

    pub fn calls(&self) -> Vec<CallRequest> {
        lock(&self.calls).clone()
    }

    /// Number of read-only calls made to `method` on `binding`.
    pub fn calls_to(&self, binding: &ContractBinding, method: &str) -> usize {
        let Some(selector) = binding.method(method).map(Function::selector) else {
            return 0;
        };
        lock(&self.calls)
            .iter()
            .filter(|call| call.to == binding.address() && call.data.starts_with(selector.as_slice()))
            .count()
    }

    pub fn sent_transactions(&self) -> Vec<TransactionRequest> {
        lock(&self.sent).clone()
    }

    /// Hash the mock assigns to the `index`-th sent transaction.
    pub fn tx_hash(index: usize) -> B256 {
        keccak256((index as u64).to_be_bytes())
    }
}

#[async_trait]
impl RpcProvider for MockProvider {
    async fn call(&self, request: CallRequest) -> Result<Bytes, ProviderError> {
        lock(&self.calls).push(request.clone());

        if request.data.len() < 4 {
            return Err(ProviderError::new("calldata shorter than a selector"));
        }
        let selector = Selector::from_slice(&request.data[..4]);
        let (function, handler) = {
            let routes = lock(&self.routes);
            let route = routes.get(&(request.to, selector)).ok_or_else(|| {
                ProviderError::new(format!("no scripted response for {selector} at {}", request.to))
            })?;
            (route.function.clone(), Arc::clone(&route.handler))
        };

        let inputs = function
            .abi_decode_input(&request.data[4..])
            .map_err(|e| ProviderError::new(format!("undecodable input: {e}")))?;
        let outputs = handler(&inputs)?;
        let encoded = function
            .abi_encode_output(&outputs)
            .map_err(|e| ProviderError::new(format!("unencodable output: {e}")))?;
        Ok(encoded.into())
    }

    async fn send_transaction(&self, request: TransactionRequest) -> Result<B256, ProviderError> {
        if let Some(error) = lock(&self.send_failure).clone() {
            return Err(error);
        }
        let mut sent = lock(&self.sent);
        sent.push(request);
        Ok(Self::tx_hash(sent.len() - 1))
    }
}
