use std::str::FromStr;

/// Contracts whose addresses are published by `Fin4Main`.
///
/// Verifier type contracts are registered under their own runtime names and
/// have no variant here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContractName {
    Fin4Main,
    Fin4UncappedTokenCreator,
    Fin4CappedTokenCreator,
    Fin4TokenManagement,
    Fin4Claiming,
    Fin4Collections,
    Fin4Messaging,
    Fin4Verifying,
    Fin4Groups,
    Fin4SystemParameters,
    Fin4Voting,
    Rep,
    Gov,
    Registry,
    PlcrVoting,
    Parameterizer,
}

impl ContractName {
    /// Order of `Fin4Main.getSatelliteAddresses()` outputs.
    pub const SATELLITES: [ContractName; 10] = [
        ContractName::Fin4UncappedTokenCreator,
        ContractName::Fin4CappedTokenCreator,
        ContractName::Fin4TokenManagement,
        ContractName::Fin4Claiming,
        ContractName::Fin4Collections,
        ContractName::Fin4Messaging,
        ContractName::Fin4Verifying,
        ContractName::Fin4Groups,
        ContractName::Fin4SystemParameters,
        ContractName::Fin4Voting,
    ];

    /// Order of `Fin4Main.getTCRaddresses()` outputs.
    pub const TCR: [ContractName; 5] = [
        ContractName::Rep,
        ContractName::Gov,
        ContractName::Registry,
        ContractName::PlcrVoting,
        ContractName::Parameterizer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContractName::Fin4Main => "Fin4Main",
            ContractName::Fin4UncappedTokenCreator => "Fin4UncappedTokenCreator",
            ContractName::Fin4CappedTokenCreator => "Fin4CappedTokenCreator",
            ContractName::Fin4TokenManagement => "Fin4TokenManagement",
            ContractName::Fin4Claiming => "Fin4Claiming",
            ContractName::Fin4Collections => "Fin4Collections",
            ContractName::Fin4Messaging => "Fin4Messaging",
            ContractName::Fin4Verifying => "Fin4Verifying",
            ContractName::Fin4Groups => "Fin4Groups",
            ContractName::Fin4SystemParameters => "Fin4SystemParameters",
            ContractName::Fin4Voting => "Fin4Voting",
            ContractName::Rep => "REP",
            ContractName::Gov => "GOV",
            ContractName::Registry => "Registry",
            ContractName::PlcrVoting => "PLCRVoting",
            ContractName::Parameterizer => "Parameterizer",
        }
    }

    /// Events an external subscriber should listen to once the contract is registered.
    pub fn monitored_events(&self) -> &'static [&'static str] {
        match self {
            ContractName::Fin4TokenManagement => &["Fin4TokenCreated"],
            ContractName::Fin4Messaging => &["NewMessage", "MessageMarkedAsRead"],
            ContractName::Fin4Claiming => &[
                "ClaimSubmitted",
                "ClaimApproved",
                "ClaimRejected",
                "VerifierApproved",
                "VerifierRejected",
                "UpdatedTotalSupply",
            ],
            ContractName::Fin4Verifying => &["SubmissionAdded"],
            _ => &[],
        }
    }
}

impl FromStr for ContractName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        std::iter::once(ContractName::Fin4Main)
            .chain(ContractName::SATELLITES)
            .chain(ContractName::TCR)
            .find(|name| name.as_str() == s)
            .ok_or_else(|| format!("'{}' is not a valid contract name", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for name in std::iter::once(ContractName::Fin4Main)
            .chain(ContractName::SATELLITES)
            .chain(ContractName::TCR)
        {
            assert_eq!(name.as_str().parse::<ContractName>().unwrap(), name);
        }
        assert!("Fin4Unknown".parse::<ContractName>().is_err());
    }

    #[test]
    fn claiming_subscribes_to_claim_events() {
        let events = ContractName::Fin4Claiming.monitored_events();
        assert!(events.contains(&"ClaimSubmitted"));
        assert!(ContractName::Fin4Groups.monitored_events().is_empty());
    }
}
