use std::sync::Arc;

use super::descriptor::CurrencyDescriptor;
use super::metadata::{CommunityLink, CurrencyMetadata};
use crate::blockchain::{AbeExplorer, Transport};
use crate::config::ExplorerSettings;
use crate::models::{Capability, VERTCOIN_ADDRESS_RULE};

pub const CODE: &str = "vtc";

pub const CAPABILITIES: &[Capability] = &[
    Capability::BlockHeight,
    Capability::Difficulty,
    Capability::ReceivedAmount,
];

pub const METADATA: CurrencyMetadata = CurrencyMetadata {
    name: "Vertcoin",
    home_url: "http://www.vertcoin.org/",
    community_links: &[CommunityLink {
        url: "http://vertcoinforum.com/",
        title: "Vertcoin Forum",
    }],
    explorer_name: "Vertcoin Block Explorer",
    explorer_url: "http://vtc.sovereignshare.com/exp/",
    balance_url_template: "http://vtc.sovereignshare.com/exp/#/vtc/address/{address}",
};

pub fn descriptor(transport: Arc<dyn Transport>, settings: ExplorerSettings) -> CurrencyDescriptor {
    CurrencyDescriptor::new(
        CODE,
        CAPABILITIES,
        VERTCOIN_ADDRESS_RULE,
        Arc::new(AbeExplorer::vertcoin(transport, settings)),
        METADATA,
    )
}
