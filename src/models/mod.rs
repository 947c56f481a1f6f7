pub mod capability;
pub mod query;
pub mod address_validator;

pub use capability::{Capability, CapabilitySet};
pub use query::{BalanceQuery, FetchOutcome, ParsedValue, QueryKind};
pub use address_validator::{AddressValidationRule, BITCOIN_ADDRESS_RULE, VERTCOIN_ADDRESS_RULE};
