use std::sync::Arc;

use super::descriptor::CurrencyDescriptor;
use super::metadata::{CommunityLink, CurrencyMetadata};
use crate::blockchain::{BlockchainInfo, Transport};
use crate::config::ExplorerSettings;
use crate::models::{Capability, BITCOIN_ADDRESS_RULE};

pub const CODE: &str = "btc";

pub const CAPABILITIES: &[Capability] = &[
    Capability::BlockHeight,
    Capability::Difficulty,
    Capability::ReceivedAmount,
    Capability::ConfirmableBalance,
    Capability::BlockBalanceable,
];

pub const METADATA: CurrencyMetadata = CurrencyMetadata {
    name: "Bitcoin",
    home_url: "http://bitcoin.org/",
    community_links: &[CommunityLink {
        url: "https://www.weusecoins.com/en/",
        title: "What is Bitcoin?",
    }],
    explorer_name: "Blockchain.info",
    explorer_url: "https://blockchain.info/",
    balance_url_template: "https://blockchain.info/address/{address}",
};

pub fn descriptor(transport: Arc<dyn Transport>, settings: ExplorerSettings) -> CurrencyDescriptor {
    CurrencyDescriptor::new(
        CODE,
        CAPABILITIES,
        BITCOIN_ADDRESS_RULE,
        Arc::new(BlockchainInfo::new(transport, settings)),
        METADATA,
    )
}
