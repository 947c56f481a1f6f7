pub mod transport;
pub mod confirmations;
pub mod response_parser;
pub mod explorer;
pub mod explorers;

pub use transport::{Transport, HttpTransport};
pub use confirmations::{ConfirmationResolver, BLOCKCHAIN_INFO_MAX_CONFIRMATIONS};
pub use response_parser::{ErrorClassifier, ErrorPattern, ErrorRule, KnownError, ResponseParser};
pub use explorer::ExplorerClient;
pub use explorers::{AbeExplorer, BlockchainInfo};
