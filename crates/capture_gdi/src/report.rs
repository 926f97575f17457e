//! Terminal result record
//!
//! One record per helper invocation, written as a single JSON line on
//! stdout and parsed back by the MCP server.

use crate::Rect;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureMode {
    Region,
    Full,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureReport {
    pub ok: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<CaptureMode>,

    /// Captured rectangle in absolute desktop coordinates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rect: Option<Rect>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    /// 0-based display index of a single-monitor full capture
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor_index: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub all: Option<bool>,
}

impl CaptureReport {
    fn blank(ok: bool, mode: Option<CaptureMode>) -> Self {
        Self {
            ok,
            cancelled: None,
            error: None,
            path: None,
            mode,
            rect: None,
            width: None,
            height: None,
            monitor_index: None,
            all: None,
        }
    }

    pub fn region_ok(path: &Path, rect: Rect) -> Self {
        Self {
            path: Some(path.display().to_string()),
            rect: Some(rect),
            width: Some(rect.width),
            height: Some(rect.height),
            ..Self::blank(true, Some(CaptureMode::Region))
        }
    }

    pub fn region_cancelled() -> Self {
        Self {
            cancelled: Some(true),
            ..Self::blank(false, Some(CaptureMode::Region))
        }
    }

    pub fn region_error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::blank(false, Some(CaptureMode::Region))
        }
    }

    pub fn full_ok(path: &Path, rect: Rect, all: bool, monitor_index: Option<u32>) -> Self {
        Self {
            path: Some(path.display().to_string()),
            rect: Some(rect),
            width: Some(rect.width),
            height: Some(rect.height),
            monitor_index,
            all: Some(all),
            ..Self::blank(true, Some(CaptureMode::Full))
        }
    }

    /// Failure before any capture mode ran (bad usage, wrong platform)
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::blank(false, None)
        }
    }

    pub fn was_cancelled(&self) -> bool {
        self.cancelled.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn region_ok_wire_shape() {
        let path = PathBuf::from("shots/region.png");
        let report = CaptureReport::region_ok(&path, Rect::new(-1820, 50, 300, 200));
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();

        assert_eq!(json["ok"], true);
        assert_eq!(json["mode"], "region");
        assert_eq!(json["rect"]["x"], -1820);
        assert_eq!(json["rect"]["width"], 300);
        assert_eq!(json["width"], 300);
        assert_eq!(json["height"], 200);
        assert!(json.get("cancelled").is_none());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn cancelled_report_omits_capture_fields() {
        let json = serde_json::to_string(&CaptureReport::region_cancelled()).unwrap();
        assert_eq!(json, r#"{"ok":false,"cancelled":true,"mode":"region"}"#);
    }

    #[test]
    fn too_small_is_a_region_error() {
        let json =
            serde_json::to_string(&CaptureReport::region_error("Selection too small.")).unwrap();
        assert_eq!(json, r#"{"ok":false,"error":"Selection too small.","mode":"region"}"#);
    }

    #[test]
    fn full_ok_carries_monitor_fields() {
        let report =
            CaptureReport::full_ok(&PathBuf::from("full.png"), Rect::new(0, 0, 1920, 1080), false, Some(1));
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["mode"], "full");
        assert_eq!(json["monitorIndex"], 1);
        assert_eq!(json["all"], false);
    }

    #[test]
    fn environment_failure_has_no_mode() {
        let json = serde_json::to_string(&CaptureReport::failure("Missing --out <path>")).unwrap();
        assert_eq!(json, r#"{"ok":false,"error":"Missing --out <path>"}"#);
    }

    #[test]
    fn round_trips_through_the_server_parser() {
        let line = r#"{"ok":true,"path":"a.png","mode":"region","rect":{"x":5,"y":6,"width":30,"height":40},"width":30,"height":40}"#;
        let report: CaptureReport = serde_json::from_str(line).unwrap();
        assert!(report.ok);
        assert!(!report.was_cancelled());
        assert_eq!(report.rect.unwrap(), Rect::new(5, 6, 30, 40));
    }
}
