//! Coarse User-Agent classification for click analytics.
//!
//! Wraps woothee to produce the three categorical labels stored with each
//! click: device category, browser name, and operating system name.

use woothee::parser::Parser;

/// Label substituted for any attribute that cannot be classified.
pub const UNKNOWN: &str = "Unknown";

/// Coarse client attributes derived from a User-Agent string.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientInfo {
    pub device: String,
    pub browser: String,
    pub os: String,
}

impl ClientInfo {
    fn unknown() -> Self {
        Self {
            device: UNKNOWN.to_string(),
            browser: UNKNOWN.to_string(),
            os: UNKNOWN.to_string(),
        }
    }
}

/// Classifies a User-Agent string into device/browser/OS labels.
///
/// A missing or unparseable User-Agent yields "Unknown" for all three
/// attributes. Never fails: the result feeds the best-effort tracking path.
pub fn classify(user_agent: Option<&str>) -> ClientInfo {
    let Some(ua) = user_agent else {
        return ClientInfo::unknown();
    };

    let parser = Parser::new();
    let Some(result) = parser.parse(ua) else {
        return ClientInfo::unknown();
    };

    ClientInfo {
        device: device_label(result.category),
        browser: label(result.name),
        os: label(result.os),
    }
}

fn label(value: &str) -> String {
    // woothee reports unclassifiable fields as "UNKNOWN"
    if value.is_empty() || value == "UNKNOWN" {
        UNKNOWN.to_string()
    } else {
        value.to_string()
    }
}

/// Maps woothee's category vocabulary onto the dashboard's device labels.
fn device_label(category: &str) -> String {
    match category {
        "pc" => "Desktop".to_string(),
        "smartphone" | "mobilephone" => "Mobile".to_string(),
        "crawler" => "Bot".to_string(),
        "appliance" | "misc" => "Other".to_string(),
        _ => UNKNOWN.to_string(),
    }
}
