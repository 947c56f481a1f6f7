pub mod plain_text;
pub mod blockchain_info;
pub mod abe;

pub use plain_text::PlainTextApi;
pub use blockchain_info::BlockchainInfo;
pub use abe::AbeExplorer;
