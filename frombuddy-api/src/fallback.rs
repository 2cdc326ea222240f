//! Fallback guide returned when generation fails for any reason

use frombuddy_common::guide::UNKNOWN_LINK;
use frombuddy_common::GuideData;

/// Sentinel `name` that marks a fallback guide
pub const FALLBACK_NAME: &str = "Error";

/// User-facing explanation carried by the fallback guide
pub const FALLBACK_EXPLANATION: &str = "I'm having trouble structuring the guide right now. \
Please try again or check the static services menu.";

/// Build the fixed, schema-conformant fallback guide
pub fn compose() -> GuideData {
    GuideData {
        name: FALLBACK_NAME.to_string(),
        steps: Vec::new(),
        checklist: Vec::new(),
        official_link: UNKNOWN_LINK.to_string(),
        explanation: FALLBACK_EXPLANATION.to_string(),
    }
}
