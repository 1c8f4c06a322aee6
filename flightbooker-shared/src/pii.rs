use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

const MASK: &str = "********";

/// Wrapper for card data and other secrets. `Debug`, `Display` and
/// serialization all emit a fixed mask, so the value never reaches a log line
/// or a response body. Deserialization reads the real value.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Masked<T>(pub T);

impl<T> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl<T> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl<T> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(MASK)
    }
}

impl<T> Masked<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    pub fn expose(&self) -> &T {
        &self.0
    }
}

impl Masked<String> {
    /// `**** 1234` style hint for receipts.
    pub fn last_four(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        let start = chars.len().saturating_sub(4);
        let tail: String = chars[start..].iter().collect();
        format!("**** {}", tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_masked() {
        let card = Masked::new("4111111111111111".to_string());
        assert_eq!(format!("{:?}", card), "********");
        assert_eq!(card.to_string(), "********");
    }

    #[test]
    fn test_serialize_is_masked() {
        let cvv = Masked::new("123".to_string());
        assert_eq!(serde_json::to_string(&cvv).unwrap(), "\"********\"");

        let back: Masked<String> = serde_json::from_str("\"987\"").unwrap();
        assert_eq!(back.expose(), "987");
    }

    #[test]
    fn test_last_four() {
        let card = Masked::new("4111111111111234".to_string());
        assert_eq!(card.last_four(), "**** 1234");
        assert_eq!(Masked::new("12".to_string()).last_four(), "**** 12");
    }
}
