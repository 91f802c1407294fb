use serde::{Deserialize, Serialize};

/// Trust rank of the source that reported a sample.
///
/// Variants are declared lowest first so the derived `Ord` gives
/// `Watch > Phone > AppleOther > ThirdParty`.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "camelCase")]
pub enum SourcePriority {
    #[default]
    ThirdParty,
    AppleOther,
    Phone,
    Watch,
}

impl SourcePriority {
    /// Every priority, highest first.
    pub const ALL: [SourcePriority; 4] = [
        SourcePriority::Watch,
        SourcePriority::Phone,
        SourcePriority::AppleOther,
        SourcePriority::ThirdParty,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourcePriority::Watch => "watch",
            SourcePriority::Phone => "phone",
            SourcePriority::AppleOther => "appleOther",
            SourcePriority::ThirdParty => "thirdParty",
        }
    }

    pub fn rank(&self) -> u8 {
        match self {
            SourcePriority::Watch => 3,
            SourcePriority::Phone => 2,
            SourcePriority::AppleOther => 1,
            SourcePriority::ThirdParty => 0,
        }
    }
}
