use crate::classifier::config::ClassifierConfig;
use crate::models::{Provenance, SourcePriority};

/// Maps provenance hints to a [`SourcePriority`].
///
/// Checks run in order and the first match wins:
/// watch tokens in product type, device model or device name;
/// phone tokens in product type or device name;
/// a first-party bundle prefix; otherwise third party.
#[derive(Debug, Clone)]
pub struct SourceClassifier {
    config: ClassifierConfig,
}

impl Default for SourceClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

impl SourceClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config: config.normalized(),
        }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn priority(&self, provenance: &Provenance) -> SourcePriority {
        let product_type = normalized(provenance.product_type.as_deref());
        let device_model = normalized(provenance.device_model.as_deref());
        let device_name = normalized(provenance.device_name.as_deref());

        let watch_hints = [&product_type, &device_model, &device_name];
        if watch_hints
            .iter()
            .any(|hint| contains_any(hint.as_deref(), &self.config.watch_tokens))
        {
            return SourcePriority::Watch;
        }

        let phone_hints = [&product_type, &device_name];
        if phone_hints
            .iter()
            .any(|hint| contains_any(hint.as_deref(), &self.config.phone_tokens))
        {
            return SourcePriority::Phone;
        }

        if self.is_first_party(provenance.bundle_identifier.as_deref()) {
            return SourcePriority::AppleOther;
        }

        SourcePriority::ThirdParty
    }

    pub fn is_first_party(&self, bundle_identifier: Option<&str>) -> bool {
        let Some(bundle) = normalized(bundle_identifier) else {
            return false;
        };
        self.config
            .first_party_prefixes
            .iter()
            .any(|prefix| bundle.starts_with(prefix.as_str()))
    }
}

/// Classify with the default token lists.
pub fn priority(provenance: &Provenance) -> SourcePriority {
    SourceClassifier::default().priority(provenance)
}

fn normalized(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

fn contains_any(hint: Option<&str>, tokens: &[String]) -> bool {
    match hint {
        Some(hint) => tokens.iter().any(|token| hint.contains(token.as_str())),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provenance(
        bundle: Option<&str>,
        product_type: Option<&str>,
        device_model: Option<&str>,
        device_name: Option<&str>,
    ) -> Provenance {
        Provenance {
            bundle_identifier: bundle.map(String::from),
            product_type: product_type.map(String::from),
            device_model: device_model.map(String::from),
            device_name: device_name.map(String::from),
        }
    }

    #[test]
    fn watch_from_product_type() {
        let p = provenance(Some("com.apple.health"), Some("Watch6,1"), None, None);
        assert_eq!(priority(&p), SourcePriority::Watch);
    }

    #[test]
    fn phone_from_product_type() {
        let p = provenance(Some("com.apple.health"), Some("iPhone16,2"), None, None);
        assert_eq!(priority(&p), SourcePriority::Phone);
    }

    #[test]
    fn watch_from_device_model() {
        let p = provenance(None, None, Some("Apple Watch Series 9"), None);
        assert_eq!(priority(&p), SourcePriority::Watch);
    }

    #[test]
    fn phone_from_device_name() {
        let p = provenance(None, None, None, Some("iPhone de Marcus"));
        assert_eq!(priority(&p), SourcePriority::Phone);
    }

    #[test]
    fn phone_tokens_ignore_device_model() {
        let p = provenance(None, None, Some("iPhone"), None);
        assert_eq!(priority(&p), SourcePriority::ThirdParty);
    }

    #[test]
    fn watch_beats_phone_when_both_hinted() {
        let p = provenance(None, Some("iPhone16,2"), Some("Watch7,3"), None);
        assert_eq!(priority(&p), SourcePriority::Watch);
    }

    #[test]
    fn first_party_bundle_is_apple_other() {
        let p = provenance(Some("com.apple.health"), None, None, None);
        assert_eq!(priority(&p), SourcePriority::AppleOther);
    }

    #[test]
    fn unknown_bundle_is_third_party() {
        let p = provenance(Some("com.thirdparty.pedometer"), None, None, None);
        assert_eq!(priority(&p), SourcePriority::ThirdParty);
    }

    #[test]
    fn all_absent_is_third_party() {
        assert_eq!(priority(&Provenance::default()), SourcePriority::ThirdParty);
    }

    #[test]
    fn matching_is_case_insensitive_and_trimmed() {
        let p = provenance(Some("  COM.APPLE.Health "), None, None, Some("  IPHONE  "));
        assert_eq!(priority(&p), SourcePriority::Phone);
        let q = provenance(Some("  COM.APPLE.Health "), None, None, Some("   "));
        assert_eq!(priority(&q), SourcePriority::AppleOther);
    }

    #[test]
    fn empty_config_is_still_total() {
        let classifier = SourceClassifier::new(ClassifierConfig {
            watch_tokens: vec![],
            phone_tokens: vec!["  ".into()],
            first_party_prefixes: vec![],
        });
        let p = provenance(Some("com.apple.health"), Some("Watch6,1"), None, Some("iPhone"));
        assert_eq!(classifier.priority(&p), SourcePriority::ThirdParty);
    }

    #[test]
    fn custom_tokens_are_normalized() {
        let classifier = SourceClassifier::new(ClassifierConfig {
            watch_tokens: vec![" Band ".into()],
            phone_tokens: vec!["Pixel".into()],
            first_party_prefixes: vec!["Com.Vendor.".into()],
        });
        assert_eq!(
            classifier.priority(&provenance(None, None, Some("Fitness BAND 4"), None)),
            SourcePriority::Watch
        );
        assert_eq!(
            classifier.priority(&provenance(None, Some("pixel8"), None, None)),
            SourcePriority::Phone
        );
        assert!(classifier.is_first_party(Some("com.vendor.steps")));
    }
}
