use std::sync::{Arc, Mutex};

use alloy::{
    json_abi::JsonAbi,
    primitives::{Address, B256},
};
use fin4_blockchain::{
    ContractBinding, ContractCaller, ContractName, ContractRegistry, DynSolValue, EncodedCall,
    InterfaceCatalog, ProviderError, testing::MockProvider, uint,
};
use fin4_domain::{Notifier, StoreCommand, StoreDispatcher, store_channel};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::{
    config::{TransactionsConfig, defaults},
    fetchers::{Aggregator, SatelliteContracts, TcrContracts},
};

const MAIN_ADDRESS: Address = Address::repeat_byte(0xf4);
const COIN_FLIP_ADDRESS: Address = Address::repeat_byte(0xcf);
const ACCOUNT: Address = Address::repeat_byte(0xac);

const INTERFACES: &[(&str, &[&str])] = &[
    (
        "Fin4Main",
        &[
            "function getSatelliteAddresses() view returns (address, address, address, address, address, address, address, address, address, address)",
            "function getTCRaddresses() view returns (address, address, address, address, address)",
        ],
    ),
    (
        "Fin4UncappedTokenCreator",
        &["function createNewToken(string name, string symbol, string description, string unit)"],
    ),
    (
        "Fin4CappedTokenCreator",
        &["function createNewToken(string name, string symbol, string description, string unit, uint256 cap)"],
    ),
    (
        "Fin4TokenManagement",
        &[
            "function getAllFin4Tokens() view returns (address[])",
            "function getTokenInfo(address token) view returns (bool, string, string, string, string, uint256, uint256, bool, bytes32[])",
            "function getMyNonzeroTokenBalances() view returns (address[], uint256[])",
            "function getUnderlyings() view returns (bytes32[])",
            "event Fin4TokenCreated(address addr, string name, string symbol, string description, string unit, address creator, uint256 creationTime, bool hasFixedMintingQuantity)",
        ],
    ),
    (
        "Fin4Claiming",
        &[
            "function submitClaim(address tokenAddress, uint256 quantity, string comment)",
            "function getTokensWhereUserHasClaims() view returns (address[])",
            "function getMyClaimIdsOnThisToken(address token) view returns (uint256[])",
            "function getClaimOnThisToken(address token, uint256 claimId) view returns (address, bool, bool, uint256, uint256, string, address[], uint256[], address[])",
            "event ClaimSubmitted(address tokenAddr, uint256 claimId, address claimer, uint256 quantity, uint256 claimCreationTime, string comment, address[] requiredVerifierTypes)",
            "event ClaimApproved(address tokenAddr, uint256 claimId, address claimer, uint256 mintedQuantity, uint256 newBalance)",
            "event ClaimRejected(address tokenAddr, uint256 claimId, address claimer)",
            "event VerifierApproved(address tokenAddrToReceiveVerifierNotice, address verifierTypeAddress, uint256 claimId, address claimer, string message)",
            "event VerifierRejected(address tokenAddrToReceiveVerifierNotice, address verifierTypeAddress, uint256 claimId, address claimer, string message)",
            "event UpdatedTotalSupply(address tokenAddr, uint256 totalSupply)",
        ],
    ),
    (
        "Fin4Collections",
        &[
            "function getCollectionsCount() view returns (uint256)",
            "function getCollection(uint256 collectionId) view returns (bool, bool, bool, uint256, address[], string, string, string)",
        ],
    ),
    (
        "Fin4Messaging",
        &[
            "function getMyMessagesCount() view returns (uint256)",
            "function getMyMessage(uint256 index) view returns (uint256, uint256, address, string, string, bool, string, uint256)",
            "event NewMessage(address receiver, uint256 messageId)",
            "event MessageMarkedAsRead(address receiver, uint256 messageId)",
        ],
    ),
    (
        "Fin4Verifying",
        &[
            "function getVerifierTypes() view returns (address[])",
            "function getVerifierTypeInfo(address verifierType) view returns (string, string, string, bool)",
            "function getSubmissionsCount() view returns (uint256)",
            "function submissions(uint256 index) view returns (uint256, address, address, address, uint256, uint256, string)",
            "event SubmissionAdded(uint256 submissionId, address verifierType, address token, address user, uint256 timestamp, uint256 contentType, string content)",
        ],
    ),
    ("Fin4Groups", &["function getGroupsCount() view returns (uint256)"]),
    (
        "Fin4SystemParameters",
        &["function getSystemParameters() view returns (uint256, uint256)"],
    ),
    (
        "Fin4Voting",
        &["function isTokenRepresentative(address token) view returns (bool)"],
    ),
    ("REP", &["function balanceOf(address owner) view returns (uint256)"]),
    ("GOV", &["function balanceOf(address owner) view returns (uint256)"]),
    (
        "Registry",
        &["function getWhitelistedListingKeys() view returns (bytes32[])"],
    ),
    (
        "PLCRVoting",
        &["function pollMap(uint256 pollID) view returns (uint256, uint256, uint256, uint256, uint256)"],
    ),
    ("Parameterizer", &["function getAll() view returns (uint256[])"]),
    ("Fin4BaseVerifierType", &["function getName() view returns (string)"]),
    (
        "CoinFlip",
        &[
            "function getName() view returns (string)",
            "function submitProof_CoinFlip(address tokenAddrToReceiveVerifierNotice, uint256 claimId) payable",
        ],
    ),
];

fn catalog_without(missing: Option<&str>) -> InterfaceCatalog {
    let catalog = InterfaceCatalog::in_memory();
    for (name, signatures) in INTERFACES {
        if Some(*name) != missing {
            catalog.insert(*name, JsonAbi::parse(signatures.iter().copied()).unwrap());
        }
    }
    catalog
}

pub(crate) fn satellite_address(index: usize) -> Address {
    Address::with_last_byte(0x10 + index as u8)
}

pub(crate) fn tcr_address(index: usize) -> Address {
    Address::with_last_byte(0x30 + index as u8)
}

fn address_of(name: &str) -> Address {
    if let Some(i) = ContractName::SATELLITES.iter().position(|n| n.as_str() == name) {
        return satellite_address(i);
    }
    if let Some(i) = ContractName::TCR.iter().position(|n| n.as_str() == name) {
        return tcr_address(i);
    }
    match name {
        "Fin4Main" => MAIN_ADDRESS,
        "CoinFlip" => COIN_FLIP_ADDRESS,
        other => panic!("no fixture address for {other}"),
    }
}

#[derive(Default)]
pub(crate) struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub(crate) fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn report_failure(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Registry, catalog and scripted provider wired the way bootstrap wires them.
pub(crate) struct Fixture {
    pub store: StoreDispatcher,
    pub receiver: UnboundedReceiver<StoreCommand>,
    pub registry: Arc<ContractRegistry>,
    pub catalog: Arc<InterfaceCatalog>,
    pub provider: Arc<MockProvider>,
    pub caller: ContractCaller,
    pub notifier: Arc<RecordingNotifier>,
    pub main: Arc<ContractBinding>,
    pub account: Address,
}

impl Fixture {
    /// Only `Fin4Main` is registered.
    pub(crate) fn new() -> Self {
        Self::build(catalog_without(None))
    }

    pub(crate) fn without_interface(name: &str) -> Self {
        Self::build(catalog_without(Some(name)))
    }

    fn build(catalog: InterfaceCatalog) -> Self {
        let (store, receiver) = store_channel();
        let registry = Arc::new(ContractRegistry::new(store.clone()));
        let catalog = Arc::new(catalog);
        let provider = Arc::new(MockProvider::new());
        let caller = ContractCaller::new(Arc::clone(&registry), provider.clone());
        let main = registry
            .register("Fin4Main", MAIN_ADDRESS, catalog.get("Fin4Main").unwrap(), &[])
            .unwrap();

        let mut fixture = Self {
            store,
            receiver,
            registry,
            catalog,
            provider,
            caller,
            notifier: Arc::new(RecordingNotifier::default()),
            main,
            account: ACCOUNT,
        };
        drain(&mut fixture.receiver);
        fixture
    }

    /// Satellites and the `CoinFlip` verifier type registered; setup commands drained.
    pub(crate) fn with_satellites() -> Self {
        let mut fixture = Self::new();
        for name in ContractName::SATELLITES {
            fixture.register(name.as_str(), name.monitored_events());
        }
        fixture.register("CoinFlip", &[]);
        drain(&mut fixture.receiver);
        fixture
    }

    /// TCR contracts registered; setup commands drained.
    pub(crate) fn with_tcr() -> Self {
        let mut fixture = Self::new();
        for name in ContractName::TCR {
            fixture.register(name.as_str(), &[]);
        }
        drain(&mut fixture.receiver);
        fixture
    }

    fn register(&self, name: &str, events: &[&str]) {
        self.registry
            .register(name, address_of(name), self.catalog.get(name).unwrap(), events)
            .unwrap();
    }

    pub(crate) fn binding(&self, name: &str) -> Arc<ContractBinding> {
        self.registry.lookup(name).unwrap()
    }

    pub(crate) fn satellites(&self) -> SatelliteContracts {
        SatelliteContracts {
            uncapped_token_creator: self.binding("Fin4UncappedTokenCreator"),
            capped_token_creator: self.binding("Fin4CappedTokenCreator"),
            token_management: self.binding("Fin4TokenManagement"),
            claiming: self.binding("Fin4Claiming"),
            collections: self.binding("Fin4Collections"),
            messaging: self.binding("Fin4Messaging"),
            verifying: self.binding("Fin4Verifying"),
            groups: self.binding("Fin4Groups"),
            system_parameters: self.binding("Fin4SystemParameters"),
            voting: self.binding("Fin4Voting"),
        }
    }

    pub(crate) fn tcr(&self) -> TcrContracts {
        TcrContracts {
            rep: self.binding("REP"),
            gov: self.binding("GOV"),
            registry: self.binding("Registry"),
            plcr_voting: self.binding("PLCRVoting"),
            parameterizer: self.binding("Parameterizer"),
        }
    }

    pub(crate) fn aggregator(&self) -> Aggregator {
        Aggregator::new(
            self.caller.clone(),
            Arc::clone(&self.catalog),
            self.store.clone(),
            Arc::clone(&self.main),
            self.account,
        )
    }

    pub(crate) fn transactions_config(&self) -> TransactionsConfig {
        defaults::config().transactions.resolve().unwrap()
    }

    pub(crate) fn encode(&self, contract: &str, method: &str, params: Vec<DynSolValue>) -> EncodedCall {
        self.caller.encode(contract, method, params).unwrap()
    }

    pub(crate) fn claim_params(&self) -> Vec<DynSolValue> {
        vec![
            DynSolValue::Address(Address::repeat_byte(0x70)),
            uint(5),
            DynSolValue::String("planted a tree".to_string()),
        ]
    }

    pub(crate) fn coin_flip_params(&self) -> Vec<DynSolValue> {
        vec![DynSolValue::Address(Address::repeat_byte(0x70)), uint(0)]
    }

    /// Scripts `method` of the contract registered (or to be registered) as `name`.
    pub(crate) fn route<F>(&self, name: &str, method: &str, handler: F)
    where
        F: Fn(&[DynSolValue]) -> Result<Vec<DynSolValue>, ProviderError> + Send + Sync + 'static,
    {
        let interface = self.catalog.get(name).unwrap();
        let function = interface.function(method).unwrap()[0].clone();
        self.provider.route(address_of(name), function, handler);
    }

    pub(crate) fn script_satellite_addresses(&self) -> Vec<Address> {
        let addresses: Vec<Address> = (0..10).map(satellite_address).collect();
        let outputs: Vec<DynSolValue> = addresses.iter().copied().map(DynSolValue::Address).collect();
        self.route("Fin4Main", "getSatelliteAddresses", move |_| Ok(outputs.clone()));
        addresses
    }

    pub(crate) fn script_tcr_addresses(&self) -> Vec<Address> {
        let addresses: Vec<Address> = (0..5).map(tcr_address).collect();
        let outputs: Vec<DynSolValue> = addresses.iter().copied().map(DynSolValue::Address).collect();
        self.route("Fin4Main", "getTCRaddresses", move |_| Ok(outputs.clone()));
        addresses
    }

    pub(crate) fn script_tokens(&self, tokens: &[Address]) {
        let list = address_array(tokens);
        self.route("Fin4TokenManagement", "getAllFin4Tokens", move |_| Ok(vec![list.clone()]));
        self.route("Fin4TokenManagement", "getTokenInfo", |inputs| {
            inputs[0]
                .as_address()
                .map(token_info)
                .ok_or_else(|| ProviderError::new("expected an address"))
        });
    }

    pub(crate) fn script_claims(&self, claims: &[(Address, Vec<u64>)]) {
        let tokens: Vec<Address> = claims.iter().map(|(token, _)| *token).collect();
        let ids = claims.to_vec();
        self.route("Fin4Claiming", "getTokensWhereUserHasClaims", move |_| {
            Ok(vec![address_array(&tokens)])
        });
        self.route("Fin4Claiming", "getMyClaimIdsOnThisToken", move |inputs| {
            let token = inputs[0].as_address();
            let claim_ids = ids
                .iter()
                .find(|(t, _)| Some(*t) == token)
                .map(|(_, ids)| ids.iter().copied().map(uint).collect())
                .unwrap_or_default();
            Ok(vec![DynSolValue::Array(claim_ids)])
        });
        self.route("Fin4Claiming", "getClaimOnThisToken", |_| {
            Ok(claim_row(vec![Address::repeat_byte(0x5e)], vec![1], vec![]))
        });
    }

    pub(crate) fn script_messages(&self, count: u64) {
        self.route("Fin4Messaging", "getMyMessagesCount", move |_| Ok(vec![uint(count)]));
        self.route("Fin4Messaging", "getMyMessage", |inputs| {
            let index = inputs[0]
                .as_uint()
                .map(|(index, _)| index.to::<u64>())
                .unwrap_or_default();
            Ok(vec![
                uint(index),
                uint(index % 3),
                DynSolValue::Address(Address::repeat_byte(0x5e)),
                DynSolValue::String("Picture".to_string()),
                DynSolValue::String(format!("message {index}")),
                DynSolValue::Bool(false),
                DynSolValue::String(String::new()),
                uint(0),
            ])
        });
    }
}

pub(crate) fn address_array(addresses: &[Address]) -> DynSolValue {
    DynSolValue::Array(addresses.iter().copied().map(DynSolValue::Address).collect())
}

/// Right-padded `bytes32` text.
pub(crate) fn bytes32(text: &str) -> B256 {
    let mut word = [0u8; 32];
    word[..text.len()].copy_from_slice(text.as_bytes());
    B256::from(word)
}

pub(crate) fn token_info(address: Address) -> Vec<DynSolValue> {
    vec![
        DynSolValue::Bool(true),
        DynSolValue::String(format!("Token {}", address[19])),
        DynSolValue::String(format!("T{}", address[19])),
        DynSolValue::String("For planting trees".to_string()),
        DynSolValue::String("trees".to_string()),
        uint(1_000),
        uint(1_580_000_000),
        DynSolValue::Bool(false),
        DynSolValue::Array(vec![DynSolValue::FixedBytes(bytes32("Gold"), 32)]),
    ]
}

pub(crate) fn claim_row(
    required: Vec<Address>,
    statuses: Vec<u64>,
    with_messages: Vec<Address>,
) -> Vec<DynSolValue> {
    vec![
        DynSolValue::Address(ACCOUNT),
        DynSolValue::Bool(false),
        DynSolValue::Bool(false),
        uint(5),
        uint(1_580_000_000),
        DynSolValue::String("planted a tree".to_string()),
        address_array(&required),
        DynSolValue::Array(statuses.into_iter().map(uint).collect()),
        address_array(&with_messages),
    ]
}

pub(crate) fn drain(receiver: &mut UnboundedReceiver<StoreCommand>) -> Vec<StoreCommand> {
    let mut commands = Vec::new();
    while let Ok(command) = receiver.try_recv() {
        commands.push(command);
    }
    commands
}

pub(crate) async fn next_command(receiver: &mut UnboundedReceiver<StoreCommand>) -> StoreCommand {
    tokio::time::timeout(std::time::Duration::from_secs(5), receiver.recv())
        .await
        .expect("timed out waiting for a store command")
        .expect("store channel closed")
}
