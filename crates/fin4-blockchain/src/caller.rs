use std::{sync::Arc, time::Instant};

use alloy::{
    dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt},
    hex,
    json_abi::Function,
    primitives::{Address, Bytes, U256},
};

use crate::{
    BlockchainError, CallRequest, ContractBinding, ContractRegistry, OutputRow, ProviderError,
    RpcProvider,
};

/// Positional call arguments. A bare scalar is the same as a one-element list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallParams(Vec<DynSolValue>);

impl CallParams {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[DynSolValue] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<DynSolValue>> for CallParams {
    fn from(values: Vec<DynSolValue>) -> Self {
        Self(values)
    }
}

impl From<DynSolValue> for CallParams {
    fn from(value: DynSolValue) -> Self {
        Self(vec![value])
    }
}

impl From<Address> for CallParams {
    fn from(address: Address) -> Self {
        DynSolValue::Address(address).into()
    }
}

impl From<U256> for CallParams {
    fn from(value: U256) -> Self {
        DynSolValue::Uint(value, 256).into()
    }
}

impl From<()> for CallParams {
    fn from(_: ()) -> Self {
        Self::empty()
    }
}

/// A fully encoded call: `selector || encoded params`, ready for the provider.
#[derive(Debug, Clone)]
pub struct EncodedCall {
    binding: Arc<ContractBinding>,
    function: Function,
    params: CallParams,
    data: Bytes,
    label: String,
}

impl EncodedCall {
    pub fn binding(&self) -> &Arc<ContractBinding> {
        &self.binding
    }

    pub fn contract(&self) -> &str {
        self.binding.name()
    }

    pub fn method(&self) -> &str {
        &self.function.name
    }

    pub fn params(&self) -> &CallParams {
        &self.params
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// `<contract>.<method>(<args>)`
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn call_request(&self, from: Address) -> CallRequest {
        CallRequest {
            from,
            to: self.binding.address(),
            data: self.data.clone(),
        }
    }

    pub fn decode_output(&self, data: &[u8]) -> Result<OutputRow, BlockchainError> {
        let values = self
            .function
            .abi_decode_output(data)
            .map_err(|e| BlockchainError::OutputDecoding {
                label: self.label.clone(),
                reason: e.to_string(),
            })?;
        Ok(OutputRow::new(self.function.name.clone(), values))
    }
}

/// Renders the human-readable call label, e.g. `Fin4Claiming.submitClaim(0xAb..,[1,2])`.
pub fn format_call_label(contract: &str, method: &str, params: &[DynSolValue]) -> String {
    let args: Vec<String> = params.iter().map(display_value).collect();
    format!("{contract}.{method}({})", args.join(","))
}

fn display_value(value: &DynSolValue) -> String {
    match value {
        DynSolValue::Bool(b) => b.to_string(),
        DynSolValue::Int(i, _) => i.to_string(),
        DynSolValue::Uint(u, _) => u.to_string(),
        DynSolValue::Address(a) => a.to_checksum(None),
        DynSolValue::String(s) => s.clone(),
        DynSolValue::Bytes(b) => hex::encode_prefixed(b),
        DynSolValue::FixedBytes(word, size) => hex::encode_prefixed(&word[..*size]),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) => {
            let items: Vec<String> = items.iter().map(display_value).collect();
            format!("[{}]", items.join(","))
        }
        DynSolValue::Tuple(items) => {
            let items: Vec<String> = items.iter().map(display_value).collect();
            format!("({})", items.join(","))
        }
        other => format!("{other:?}"),
    }
}

/// Encodes calls against registered bindings and runs read-only queries.
#[derive(Clone)]
pub struct ContractCaller {
    registry: Arc<ContractRegistry>,
    provider: Arc<dyn RpcProvider>,
}

impl ContractCaller {
    pub fn new(registry: Arc<ContractRegistry>, provider: Arc<dyn RpcProvider>) -> Self {
        Self { registry, provider }
    }

    pub fn registry(&self) -> &Arc<ContractRegistry> {
        &self.registry
    }

    pub fn provider(&self) -> &Arc<dyn RpcProvider> {
        &self.provider
    }

    pub fn encode(
        &self,
        contract: &str,
        method: &str,
        params: impl Into<CallParams>,
    ) -> Result<EncodedCall, BlockchainError> {
        let binding = self.registry.lookup(contract)?;
        Self::encode_for(binding, method, params)
    }

    /// Encodes against a binding already in hand, bypassing the registry lookup.
    pub fn encode_for(
        binding: Arc<ContractBinding>,
        method: &str,
        params: impl Into<CallParams>,
    ) -> Result<EncodedCall, BlockchainError> {
        let params = params.into();
        let function = binding
            .method(method)
            .cloned()
            .ok_or_else(|| BlockchainError::encoding(binding.name(), method, "method not found"))?;

        if function.inputs.len() != params.len() {
            return Err(BlockchainError::encoding(
                binding.name(),
                method,
                format!(
                    "expected {} parameter(s), got {}",
                    function.inputs.len(),
                    params.len()
                ),
            ));
        }
        let data = function
            .abi_encode_input(params.as_slice())
            .map_err(|e| BlockchainError::encoding(binding.name(), method, e))?;

        let label = format_call_label(binding.name(), method, params.as_slice());
        Ok(EncodedCall {
            binding,
            function,
            params,
            data: data.into(),
            label,
        })
    }

    /// Issues the read-only call and hands back the raw provider result.
    pub async fn call_raw(&self, from: Address, call: &EncodedCall) -> Result<Bytes, ProviderError> {
        let started = Instant::now();
        let result = self.provider.call(call.call_request(from)).await;
        let status = if result.is_ok() { "ok" } else { "error" };
        fin4_observability::record_contract_query(
            call.contract(),
            call.method(),
            status,
            started.elapsed(),
        );
        result
    }

    pub async fn execute(&self, from: Address, call: &EncodedCall) -> Result<OutputRow, BlockchainError> {
        let raw = self
            .call_raw(from, call)
            .await
            .map_err(|source| BlockchainError::Call {
                label: call.label().to_string(),
                source,
            })?;
        call.decode_output(&raw)
    }

    pub async fn query(
        &self,
        from: Address,
        contract: &str,
        method: &str,
        params: impl Into<CallParams>,
    ) -> Result<OutputRow, BlockchainError> {
        let call = self.encode(contract, method, params)?;
        tracing::trace!(call = call.label(), "Querying contract");
        self.execute(from, &call).await
    }

    pub async fn query_binding(
        &self,
        from: Address,
        binding: &Arc<ContractBinding>,
        method: &str,
        params: impl Into<CallParams>,
    ) -> Result<OutputRow, BlockchainError> {
        let call = Self::encode_for(Arc::clone(binding), method, params)?;
        tracing::trace!(call = call.label(), "Querying contract");
        self.execute(from, &call).await
    }
}
