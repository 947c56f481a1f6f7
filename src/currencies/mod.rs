pub mod metadata;
pub mod descriptor;
pub mod registry;
pub mod bitcoin;
pub mod vertcoin;

pub use metadata::{CommunityLink, CurrencyMetadata};
pub use descriptor::CurrencyDescriptor;
pub use registry::CurrencyRegistry;
