use serde::Serialize;

/// A community page shown next to a currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommunityLink {
    pub url: &'static str,
    pub title: &'static str,
}

/// Descriptive, behavior-free data about a currency and its explorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurrencyMetadata {
    pub name: &'static str,
    pub home_url: &'static str,
    pub community_links: &'static [CommunityLink],
    pub explorer_name: &'static str,
    pub explorer_url: &'static str,
    /// Explorer page for an address; `{address}` is replaced
    #[serde(skip)]
    pub balance_url_template: &'static str,
}

impl CurrencyMetadata {
    /// Link to the explorer's page for `address`
    pub fn balance_url(&self, address: &str) -> String {
        self.balance_url_template.replace("{address}", address)
    }
}
