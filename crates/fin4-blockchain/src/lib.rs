mod caller;
mod catalog;
mod config;
mod config_error;
mod contract_name;
mod error;
mod error_decode;
mod provider;
mod registry;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
mod values;

pub use caller::{CallParams, ContractCaller, EncodedCall, format_call_label};
pub use catalog::InterfaceCatalog;
pub use config::{BlockchainConfig, BlockchainConfigRaw, RevertDecoderKind};
pub use config_error::ConfigError;
pub use contract_name::ContractName;
pub use error::BlockchainError;
pub use error_decode::{
    DecodeShapeError, OBJECT_ENVELOPE_PREFIX, ObjectEnvelopeDecoder, RevertDataDecoder,
    RevertReasonDecoder, revert_decoder,
};
pub use provider::{
    AlloyRpcProvider, CallRequest, ProviderError, RpcProvider, TransactionRequest,
};
pub use registry::{ContractBinding, ContractRegistry};
pub use values::{OutputRow, ValueError, bytes32_to_string, uint};

pub use alloy::{
    dyn_abi::DynSolValue,
    json_abi::JsonAbi,
    primitives::{Address, B256, Bytes, U256},
};
