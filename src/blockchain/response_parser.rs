use crate::error::{BalanceError, ExplorerError};
use crate::models::{FetchOutcome, ParsedValue, QueryKind};

/// Satoshis per bitcoin
pub const SATOSHI_DIVISOR: f64 = 1e8;

/// Providers that already answer in whole coins
pub const WHOLE_COIN_DIVISOR: f64 = 1.0;

/// How a known provider error string is recognized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPattern {
    Exact(&'static str),
    Contains(&'static str),
}

/// Which classified failure a matching body maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownError {
    ChecksumInvalid,
    RateLimited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorRule {
    pub pattern: ErrorPattern,
    pub error: KnownError,
}

/// Blockchain.info's plain-text error answers
pub const BLOCKCHAIN_INFO_ERRORS: &[ErrorRule] = &[
    ErrorRule {
        pattern: ErrorPattern::Exact("Checksum does not validate"),
        error: KnownError::ChecksumInvalid,
    },
    ErrorRule {
        pattern: ErrorPattern::Contains("Maximum concurrent requests reached."),
        error: KnownError::RateLimited,
    },
];

/// Ordered table of provider error strings; the first matching rule wins
#[derive(Debug, Clone, Copy)]
pub struct ErrorClassifier {
    rules: &'static [ErrorRule],
}

impl ErrorClassifier {
    pub const fn new(rules: &'static [ErrorRule]) -> Self {
        Self { rules }
    }

    pub const fn empty() -> Self {
        Self { rules: &[] }
    }

    /// Match a raw body against the table. `None` when no rule applies.
    pub fn match_known(&self, raw: &str) -> Option<BalanceError> {
        self.rules.iter().find_map(|rule| {
            let matched = match rule.pattern {
                ErrorPattern::Exact(text) => raw == text,
                ErrorPattern::Contains(text) => raw.contains(text),
            };
            matched.then(|| match rule.error {
                KnownError::ChecksumInvalid => BalanceError::ChecksumInvalid,
                KnownError::RateLimited => BalanceError::RateLimited,
            })
        })
    }

    /// Classify a non-numeric balance body; unknown bodies keep the raw text
    pub fn classify(&self, raw: &str) -> BalanceError {
        self.match_known(raw)
            .unwrap_or_else(|| BalanceError::UnrecognizedResponse(raw.to_string()))
    }
}

/// Normalizes raw explorer bodies into numbers or typed failures
#[derive(Debug, Clone, Copy)]
pub struct ResponseParser {
    divisor: f64,
    classifier: ErrorClassifier,
}

impl ResponseParser {
    pub fn new(divisor: f64, classifier: ErrorClassifier) -> Self {
        Self { divisor, classifier }
    }

    pub fn divisor(&self) -> f64 {
        self.divisor
    }

    pub fn classifier(&self) -> &ErrorClassifier {
        &self.classifier
    }

    /// Parse a body for the given query kind
    pub fn parse(&self, raw: &str, kind: QueryKind) -> FetchOutcome<ParsedValue> {
        match kind {
            // No address at this layer; clients use `parse_balance` and attach theirs
            QueryKind::Balance => self
                .parse_balance(raw)
                .map(ParsedValue::Balance)
                .map_err(|source| ExplorerError::BalanceUnavailable {
                    address: String::new(),
                    source,
                }),
            QueryKind::BlockCount => self.parse_block_count(raw).map(ParsedValue::BlockCount),
            QueryKind::Difficulty => self.parse_difficulty(raw).map(ParsedValue::Difficulty),
        }
    }

    /// Balance in whole coins. The divisor is applied here and nowhere else.
    pub fn parse_balance(&self, raw: &str) -> Result<f64, BalanceError> {
        match parse_numeric(raw) {
            Some(value) => Ok(value / self.divisor),
            None => Err(self.classifier.classify(raw.trim())),
        }
    }

    pub fn parse_block_count(&self, raw: &str) -> FetchOutcome<u64> {
        let trimmed = raw.trim();
        trimmed
            .parse::<u64>()
            .ok()
            .or_else(|| {
                parse_numeric(trimmed)
                    .filter(|value| value.fract() == 0.0 && *value <= u64::MAX as f64)
                    .map(|value| value as u64)
            })
            .ok_or_else(|| ExplorerError::BlockCountUnavailable { raw: raw.to_string() })
    }

    pub fn parse_difficulty(&self, raw: &str) -> FetchOutcome<f64> {
        parse_numeric(raw).ok_or_else(|| ExplorerError::DifficultyUnavailable {
            raw: raw.to_string(),
        })
    }
}

/// A finite, non-negative decimal number, ignoring surrounding whitespace
fn parse_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    // `f64::from_str` would also take "inf" and "NaN"
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
    {
        return None;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blockchain_info() -> ResponseParser {
        ResponseParser::new(SATOSHI_DIVISOR, ErrorClassifier::new(BLOCKCHAIN_INFO_ERRORS))
    }

    #[test]
    fn test_balance_divided_by_satoshis() {
        let parser = blockchain_info();
        assert_eq!(parser.parse_balance("500000000").unwrap(), 5.0);
        assert_eq!(parser.parse_balance("0").unwrap(), 0.0);
        assert_eq!(parser.parse_balance("1").unwrap(), 0.00000001);
        assert_eq!(parser.parse_balance("500000000\n").unwrap(), 5.0);
    }

    #[test]
    fn test_whole_coin_provider_is_not_divided() {
        let parser = ResponseParser::new(WHOLE_COIN_DIVISOR, ErrorClassifier::empty());
        assert_eq!(parser.parse_balance("12.5").unwrap(), 12.5);
    }

    #[test]
    fn test_checksum_error_classified() {
        let parser = blockchain_info();
        assert_eq!(
            parser.parse_balance("Checksum does not validate"),
            Err(BalanceError::ChecksumInvalid)
        );
    }

    #[test]
    fn test_checksum_match_is_exact() {
        let parser = blockchain_info();
        assert_eq!(
            parser.parse_balance("Error: Checksum does not validate"),
            Err(BalanceError::UnrecognizedResponse(
                "Error: Checksum does not validate".to_string()
            ))
        );
    }

    #[test]
    fn test_rate_limit_matched_by_substring() {
        let parser = blockchain_info();
        assert_eq!(
            parser.parse_balance("Maximum concurrent requests reached. Please try again shortly."),
            Err(BalanceError::RateLimited)
        );
    }

    #[test]
    fn test_unrecognized_body_keeps_raw_text() {
        let parser = blockchain_info();
        assert_eq!(
            parser.parse_balance("abc"),
            Err(BalanceError::UnrecognizedResponse("abc".to_string()))
        );
    }

    #[test]
    fn test_empty_classifier_never_matches() {
        let parser = ResponseParser::new(SATOSHI_DIVISOR, ErrorClassifier::empty());
        assert_eq!(
            parser.parse_balance("Checksum does not validate"),
            Err(BalanceError::UnrecognizedResponse("Checksum does not validate".to_string()))
        );
    }

    #[test]
    fn test_non_finite_and_negative_rejected() {
        let parser = blockchain_info();
        for raw in ["inf", "NaN", "-5", "", "   ", "1e400", "0x10"] {
            assert!(parser.parse_balance(raw).is_err(), "{:?} accepted", raw);
        }
    }

    #[test]
    fn test_block_count_parsing() {
        let parser = blockchain_info();
        assert_eq!(parser.parse_block_count("850123").unwrap(), 850123);
        assert_eq!(parser.parse_block_count(" 850123\r\n").unwrap(), 850123);
        assert_eq!(parser.parse_block_count("850123.0").unwrap(), 850123);
        match parser.parse_block_count("850123.5") {
            Err(ExplorerError::BlockCountUnavailable { raw }) => assert_eq!(raw, "850123.5"),
            other => panic!("unexpected: {:?}", other),
        }
        assert!(matches!(
            parser.parse_block_count("Maximum concurrent requests reached."),
            Err(ExplorerError::BlockCountUnavailable { .. })
        ));
    }

    #[test]
    fn test_difficulty_is_not_divided() {
        let parser = blockchain_info();
        assert_eq!(
            parser.parse_difficulty("86871474313761.95").unwrap(),
            86871474313761.95
        );
        match parser.parse_difficulty("busy") {
            Err(ExplorerError::DifficultyUnavailable { raw }) => assert_eq!(raw, "busy"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_generic_parse_dispatch() {
        let parser = blockchain_info();
        assert_eq!(
            parser.parse("500000000", QueryKind::Balance).unwrap(),
            ParsedValue::Balance(5.0)
        );
        assert_eq!(
            parser.parse("42", QueryKind::BlockCount).unwrap(),
            ParsedValue::BlockCount(42)
        );
        assert_eq!(
            parser.parse("42", QueryKind::Difficulty).unwrap(),
            ParsedValue::Difficulty(42.0)
        );
        let err = parser.parse("Checksum does not validate", QueryKind::Balance).unwrap_err();
        assert_eq!(err.balance_error(), Some(&BalanceError::ChecksumInvalid));
    }

    #[test]
    fn test_same_body_parses_identically() {
        let parser = blockchain_info();
        assert_eq!(parser.parse_balance("123456789"), parser.parse_balance("123456789"));
        assert_eq!(parser.parse_balance("abc"), parser.parse_balance("abc"));
    }
}
