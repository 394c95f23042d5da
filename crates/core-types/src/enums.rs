use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A product feature that can be toggled on in the calculator.
///
/// `MultiChannel` adds an SMS channel next to email. The other four improve
/// the email funnel itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    MultiChannel,
    AiContent,
    Automation,
    Segmentation,
    AbTesting,
}

impl Feature {
    /// Every feature, in display order.
    pub const ALL: [Feature; 5] = [
        Feature::MultiChannel,
        Feature::AiContent,
        Feature::Automation,
        Feature::Segmentation,
        Feature::AbTesting,
    ];

    /// The stable, kebab-case identifier used on the command line and in files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::MultiChannel => "multi-channel",
            Feature::AiContent => "ai-content",
            Feature::Automation => "automation",
            Feature::Segmentation => "segmentation",
            Feature::AbTesting => "ab-testing",
        }
    }

    /// Human-readable card title.
    pub fn title(&self) -> &'static str {
        match self {
            Feature::MultiChannel => "Email + SMS",
            Feature::AiContent => "AI-Powered Content",
            Feature::Automation => "Advanced Automation",
            Feature::Segmentation => "Behavioral Segmentation",
            Feature::AbTesting => "A/B Testing",
        }
    }

    /// The one-line impact claim shown next to the title.
    pub fn headline(&self) -> &'static str {
        match self {
            Feature::MultiChannel => "+40% conversion boost",
            Feature::AiContent => "+7.4% open rate",
            Feature::Automation => "+20% conversion rate",
            Feature::Segmentation => "+18.9% click rate",
            Feature::AbTesting => "+10% overall performance",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feature {
    type Err = CoreError;

    /// Accepts the kebab-case identifier as well as the camelCase field name
    /// used by the web form (`multiChannel`, `abTesting`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(|c| c.to_lowercase())
            .collect();

        match normalized.as_str() {
            "multichannel" | "sms" => Ok(Feature::MultiChannel),
            "aicontent" => Ok(Feature::AiContent),
            "automation" => Ok(Feature::Automation),
            "segmentation" => Ok(Feature::Segmentation),
            "abtesting" => Ok(Feature::AbTesting),
            _ => Err(CoreError::UnknownFeature(s.to_string())),
        }
    }
}
