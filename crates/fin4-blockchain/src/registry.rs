use std::sync::Arc;

use alloy::{
    dyn_abi::Specifier,
    json_abi::{Function, JsonAbi},
    primitives::Address,
};
use dashmap::DashMap;
use fin4_domain::{StoreCommand, StoreDispatcher};

use crate::BlockchainError;

/// A named contract instance: runtime address plus its interface.
#[derive(Debug)]
pub struct ContractBinding {
    name: String,
    address: Address,
    interface: Arc<JsonAbi>,
    events: Vec<String>,
}

impl ContractBinding {
    /// Builds a binding after checking that every function's parameter types
    /// resolve and that every subscribed event is declared by the interface.
    pub fn new(
        name: impl Into<String>,
        address: Address,
        interface: Arc<JsonAbi>,
        events: Vec<String>,
    ) -> Result<Self, BlockchainError> {
        let name = name.into();
        let malformed = |reason: String| BlockchainError::MalformedInterface {
            name: name.clone(),
            reason,
        };

        for function in interface.functions() {
            for param in function.inputs.iter().chain(function.outputs.iter()) {
                param.resolve().map_err(|e| {
                    malformed(format!("{}: parameter type '{}': {e}", function.name, param.ty))
                })?;
            }
        }
        for event in &events {
            if interface.event(event).is_none() {
                return Err(malformed(format!("event '{event}' is not declared")));
            }
        }

        Ok(Self {
            name,
            address,
            interface,
            events,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn interface(&self) -> &Arc<JsonAbi> {
        &self.interface
    }

    pub fn events(&self) -> &[String] {
        &self.events
    }

    /// First interface entry named `method`.
    pub fn method(&self, method: &str) -> Option<&Function> {
        self.interface.function(method).and_then(|overloads| overloads.first())
    }
}

/// Name-keyed contract bindings shared by all callers.
///
/// Registration replaces any previous binding under the same name and is
/// announced to the store together with the events to subscribe to.
#[derive(Debug)]
pub struct ContractRegistry {
    bindings: DashMap<String, Arc<ContractBinding>>,
    store: StoreDispatcher,
}

impl ContractRegistry {
    pub fn new(store: StoreDispatcher) -> Self {
        Self {
            bindings: DashMap::new(),
            store,
        }
    }

    pub fn register(
        &self,
        name: &str,
        address: Address,
        interface: Arc<JsonAbi>,
        events: &[&str],
    ) -> Result<Arc<ContractBinding>, BlockchainError> {
        let events: Vec<String> = events.iter().map(|e| e.to_string()).collect();
        let binding = Arc::new(ContractBinding::new(name, address, interface, events.clone())?);

        if let Some(previous) = self.bindings.insert(name.to_string(), Arc::clone(&binding)) {
            tracing::debug!(
                contract = name,
                previous = %previous.address(),
                address = %address,
                "Replacing contract binding"
            );
        } else {
            tracing::debug!(contract = name, address = %address, "Registered contract binding");
        }

        fin4_observability::record_contract_registration(name);
        self.store.dispatch(StoreCommand::AddContract {
            name: name.to_string(),
            address,
            events,
        });

        Ok(binding)
    }

    pub fn lookup(&self, name: &str) -> Result<Arc<ContractBinding>, BlockchainError> {
        self.bindings
            .get(name)
            .map(|binding| Arc::clone(binding.value()))
            .ok_or_else(|| BlockchainError::ContractNotRegistered {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.bindings.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use fin4_domain::store_channel;

    use super::*;

    fn interface() -> Arc<JsonAbi> {
        Arc::new(
            JsonAbi::parse([
                "function getSubmissionsCount() view returns (uint256)",
                "event SubmissionAdded(uint256 submissionId, address verifierType, address token)",
            ])
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn registration_is_last_write_wins() {
        let (store, mut receiver) = store_channel();
        let registry = ContractRegistry::new(store);
        let first = Address::repeat_byte(0x01);
        let second = Address::repeat_byte(0x02);

        registry.register("Fin4Verifying", first, interface(), &[]).unwrap();
        registry
            .register("Fin4Verifying", second, interface(), &["SubmissionAdded"])
            .unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup("Fin4Verifying").unwrap().address(), second);

        let mut announced = Vec::new();
        while let Ok(command) = receiver.try_recv() {
            if let StoreCommand::AddContract { address, events, .. } = command {
                announced.push((address, events));
            }
        }
        assert_eq!(
            announced,
            vec![
                (first, vec![]),
                (second, vec!["SubmissionAdded".to_string()])
            ]
        );
    }

    #[test]
    fn shared_interface_under_distinct_names() {
        let (store, _receiver) = store_channel();
        let registry = ContractRegistry::new(store);
        let shared = interface();

        registry.register("SelfieVerifier", Address::repeat_byte(0x0a), Arc::clone(&shared), &[]).unwrap();
        registry.register("PictureVerifier", Address::repeat_byte(0x0b), shared, &[]).unwrap();

        assert_eq!(registry.names(), vec!["PictureVerifier", "SelfieVerifier"]);
    }

    #[test]
    fn undeclared_event_is_rejected_at_registration() {
        let (store, _receiver) = store_channel();
        let registry = ContractRegistry::new(store);

        let result = registry.register("Fin4Verifying", Address::ZERO, interface(), &["NewMessage"]);

        assert!(matches!(result, Err(BlockchainError::MalformedInterface { .. })));
        assert!(!registry.contains("Fin4Verifying"));
    }

    #[test]
    fn lookup_of_unknown_name_fails() {
        let (store, _receiver) = store_channel();
        let registry = ContractRegistry::new(store);

        assert!(matches!(
            registry.lookup("Registry"),
            Err(BlockchainError::ContractNotRegistered { name }) if name == "Registry"
        ));
    }
}
