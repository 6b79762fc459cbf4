//! Click analytics aggregation.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::Link;
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::AppError;
use crate::utils::user_agent::UNKNOWN;

/// Click count for one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyClicks {
    pub date: String,
    pub clicks: u64,
}

/// Count of clicks for one categorical label (device type or browser name).
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCount {
    pub name: String,
    pub value: u64,
}

/// Aggregated analytics for one link.
///
/// `total_clicks` comes from the link's counter, not from counting events:
/// the two are written independently on the tracking path and may diverge
/// under failure. Consumers must not assume equality.
#[derive(Debug, Clone)]
pub struct LinkAnalytics {
    pub link: Link,
    pub total_clicks: i64,
    pub clicks_data: Vec<DailyClicks>,
    pub device_data: Vec<CategoryCount>,
    pub browser_data: Vec<CategoryCount>,
}

/// Service producing dashboard analytics for a link.
///
/// A full recomputation on every request: one pass over the link's click
/// events folded into a daily series and categorical breakdowns. No
/// windowing, no incremental state.
pub struct AnalyticsService {
    links: Arc<dyn LinkRepository>,
    clicks: Arc<dyn ClickRepository>,
}

impl AnalyticsService {
    /// Creates a new analytics service.
    pub fn new(links: Arc<dyn LinkRepository>, clicks: Arc<dyn ClickRepository>) -> Self {
        Self { links, clicks }
    }

    /// Builds the analytics summary for an owner's link.
    ///
    /// The daily series is sorted ascending by calendar date and contains one
    /// entry per day with at least one event; days without events are absent.
    /// Device and browser breakdowns substitute "Unknown" for empty labels
    /// and carry no ordering guarantee.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the link does not exist or is not
    /// owned by `user_id`.
    pub async fn summarize(&self, user_id: i64, link_id: i64) -> Result<LinkAnalytics, AppError> {
        let link = self
            .links
            .find_by_id_for_user(link_id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "id": link_id })))?;

        let events = self.clicks.list_for_link(link.id).await?;

        let mut daily: BTreeMap<String, u64> = BTreeMap::new();
        let mut devices: HashMap<String, u64> = HashMap::new();
        let mut browsers: HashMap<String, u64> = HashMap::new();

        for click in &events {
            let day = click.clicked_at.format("%Y-%m-%d").to_string();
            *daily.entry(day).or_insert(0) += 1;
            *devices.entry(label_or_unknown(&click.device)).or_insert(0) += 1;
            *browsers
                .entry(label_or_unknown(&click.browser))
                .or_insert(0) += 1;
        }

        Ok(LinkAnalytics {
            total_clicks: link.clicks,
            link,
            clicks_data: daily
                .into_iter()
                .map(|(date, clicks)| DailyClicks { date, clicks })
                .collect(),
            device_data: into_counts(devices),
            browser_data: into_counts(browsers),
        })
    }
}

fn label_or_unknown(value: &str) -> String {
    if value.is_empty() {
        UNKNOWN.to_string()
    } else {
        value.to_string()
    }
}

fn into_counts(map: HashMap<String, u64>) -> Vec<CategoryCount> {
    map.into_iter()
        .map(|(name, value)| CategoryCount { name, value })
        .collect()
}
