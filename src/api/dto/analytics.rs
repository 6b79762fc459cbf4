//! DTOs for the link analytics endpoint.

use serde::Serialize;

use crate::api::dto::links::LinkResponse;
use crate::application::services::{CategoryCount, DailyClicks, LinkAnalytics};

/// Click count for one calendar day, for the dashboard time series.
#[derive(Debug, Serialize)]
pub struct DailyClicksDto {
    pub date: String,
    pub clicks: u64,
}

/// One slice of a categorical breakdown chart.
#[derive(Debug, Serialize)]
pub struct CategoryCountDto {
    pub name: String,
    pub value: u64,
}

/// Response for `GET /links/{id}/analytics`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub link: LinkResponse,
    pub total_clicks: i64,
    pub clicks_data: Vec<DailyClicksDto>,
    pub device_data: Vec<CategoryCountDto>,
    pub browser_data: Vec<CategoryCountDto>,
}

impl AnalyticsResponse {
    /// Builds the wire representation from the aggregated summary.
    pub fn from_summary(summary: LinkAnalytics, short_url: String) -> Self {
        Self {
            total_clicks: summary.total_clicks,
            clicks_data: summary.clicks_data.into_iter().map(Into::into).collect(),
            device_data: summary.device_data.into_iter().map(Into::into).collect(),
            browser_data: summary.browser_data.into_iter().map(Into::into).collect(),
            link: LinkResponse::from_link(summary.link, short_url),
        }
    }
}

impl From<DailyClicks> for DailyClicksDto {
    fn from(d: DailyClicks) -> Self {
        Self {
            date: d.date,
            clicks: d.clicks,
        }
    }
}

impl From<CategoryCount> for CategoryCountDto {
    fn from(c: CategoryCount) -> Self {
        Self {
            name: c.name,
            value: c.value,
        }
    }
}
