use once_cell::sync::Lazy;
use regex::Regex;

static ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9]+$").expect("alphanumeric pattern is valid")
});

/// Shape rules for a currency's addresses.
///
/// This is a format heuristic only: the Base58Check checksum is never
/// verified, so a well-shaped address with a typo still passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressValidationRule {
    pub min_length: usize,
    pub max_length: usize,
    pub allowed_prefixes: &'static [char],
}

/// Bitcoin P2PKH (`1...`) and P2SH (`3...`) addresses
pub const BITCOIN_ADDRESS_RULE: AddressValidationRule = AddressValidationRule {
    min_length: 27,
    max_length: 34,
    allowed_prefixes: &['1', '3'],
};

pub const VERTCOIN_ADDRESS_RULE: AddressValidationRule = AddressValidationRule {
    min_length: 27,
    max_length: 34,
    allowed_prefixes: &['V'],
};

impl AddressValidationRule {
    /// Check an address against this rule. Pure, no network access.
    pub fn is_valid(&self, address: &str) -> bool {
        let length = address.chars().count();
        if length < self.min_length || length > self.max_length {
            return false;
        }

        match address.chars().next() {
            Some(first) if self.allowed_prefixes.contains(&first) => {}
            _ => return false,
        }

        ALPHANUMERIC.is_match(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENESIS: &str = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa";

    #[test]
    fn test_valid_bitcoin_addresses() {
        assert!(BITCOIN_ADDRESS_RULE.is_valid(GENESIS));
        assert!(BITCOIN_ADDRESS_RULE.is_valid("3J98t1WpEZ73CNmQviecrnyiWrnqRhWNLy"));
    }

    #[test]
    fn test_length_bounds() {
        // 27 and 34 are both accepted
        assert!(BITCOIN_ADDRESS_RULE.is_valid(&format!("1{}", "a".repeat(26))));
        assert!(BITCOIN_ADDRESS_RULE.is_valid(&format!("1{}", "a".repeat(33))));

        for len in [0usize, 1, 10, 26, 35, 40, 100] {
            let address = format!("1{}", "a".repeat(len.saturating_sub(1)));
            assert_eq!(address.len(), len.max(1));
            assert!(!BITCOIN_ADDRESS_RULE.is_valid(&address), "length {} accepted", len);
        }
        assert!(!BITCOIN_ADDRESS_RULE.is_valid(""));
    }

    #[test]
    fn test_disallowed_prefix() {
        let body = &GENESIS[1..];
        for prefix in ['2', 'b', 'V', 'x', '0'] {
            let address = format!("{}{}", prefix, body);
            assert!(!BITCOIN_ADDRESS_RULE.is_valid(&address), "prefix {} accepted", prefix);
        }
        assert!(!VERTCOIN_ADDRESS_RULE.is_valid(GENESIS));
        assert!(VERTCOIN_ADDRESS_RULE.is_valid(&format!("V{}", body)));
    }

    #[test]
    fn test_non_alphanumeric_rejected() {
        assert!(!BITCOIN_ADDRESS_RULE.is_valid("1A1zP1eP5QGefi2DMPTfTL5SLmv7Div-Na"));
        assert!(!BITCOIN_ADDRESS_RULE.is_valid("1A1zP1eP5QGefi2DMPTfTL5SLmv7Div Na"));
        assert!(!BITCOIN_ADDRESS_RULE.is_valid("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNä"));
    }

    #[test]
    fn test_checksum_not_verified() {
        // Last character altered: still shaped like an address
        assert!(BITCOIN_ADDRESS_RULE.is_valid("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNb"));
    }
}
