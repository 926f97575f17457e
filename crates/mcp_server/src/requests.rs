//! Tool request schemas

use schemars::JsonSchema;
use serde::Deserialize;

pub const DEFAULT_FULL_TIMEOUT_MS: u64 = 60_000;
pub const DEFAULT_REGION_TIMEOUT_MS: u64 = 120_000;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FullScreenshotRequest {
    /// Capture every attached display as one image (default true)
    pub all_monitors: Option<bool>,
    /// 0-based display index; ignored when allMonitors is true
    pub monitor: Option<u32>,
    /// Inline the PNG as base64 image content (default false)
    pub include_image: Option<bool>,
    /// Helper timeout in milliseconds; 0 disables (default 60000)
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegionScreenshotRequest {
    /// Inline the PNG as base64 image content (default false)
    pub include_image: Option<bool>,
    /// Helper timeout in milliseconds; 0 disables (default 120000)
    pub timeout_ms: Option<u64>,
    /// Instructional text shown on the selection overlay
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListScreenshotsRequest {
    /// Maximum entries to return, 1..=200 (default 50)
    pub limit: Option<usize>,
}
