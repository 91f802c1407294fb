use serde::{Deserialize, Serialize};

/// Token lists used to recognise a sample's source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassifierConfig {
    /// Substrings of product type, device model or device name that mark a wrist-worn device
    pub watch_tokens: Vec<String>,

    /// Substrings of product type or device name that mark a handheld device
    pub phone_tokens: Vec<String>,

    /// Bundle identifier prefixes of the first-party vendor
    pub first_party_prefixes: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            watch_tokens: vec!["watch".into()],
            phone_tokens: vec!["iphone".into(), "ipod".into(), "ipad".into()],
            first_party_prefixes: vec!["com.apple.".into()],
        }
    }
}

impl ClassifierConfig {
    /// Lowercased, trimmed copy with blank tokens removed.
    pub(crate) fn normalized(&self) -> Self {
        fn clean(tokens: &[String]) -> Vec<String> {
            tokens
                .iter()
                .map(|token| token.trim().to_lowercase())
                .filter(|token| !token.is_empty())
                .collect()
        }

        Self {
            watch_tokens: clean(&self.watch_tokens),
            phone_tokens: clean(&self.phone_tokens),
            first_party_prefixes: clean(&self.first_party_prefixes),
        }
    }
}
