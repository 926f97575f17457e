//! MCP tool surface

use crate::helper::HelperRunner;
use crate::requests::{
    FullScreenshotRequest, ListScreenshotsRequest, RegionScreenshotRequest,
    DEFAULT_FULL_TIMEOUT_MS, DEFAULT_REGION_TIMEOUT_MS,
};
use crate::store::{ScreenshotStore, DEFAULT_LIST_LIMIT};
use base64::{engine::general_purpose, Engine as _};
use capture_gdi::CaptureReport;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::tool::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde_json::json;
// The tool macros expand to `dyn Future` bounds.
use std::future::Future;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct SnipServer {
    tool_router: ToolRouter<Self>,
    runner: Arc<HelperRunner>,
    store: ScreenshotStore,
}

impl SnipServer {
    pub fn new() -> anyhow::Result<Self> {
        let runner = HelperRunner::locate()?;
        info!(helper = %runner.exe().display(), "helper location resolved");

        Ok(Self {
            tool_router: Self::tool_router(),
            runner: Arc::new(runner),
            store: ScreenshotStore::in_working_dir()?,
        })
    }

    fn ensure_ready(&self) -> Result<(), McpError> {
        if !cfg!(windows) {
            return Err(McpError::internal_error(
                "This MCP server is Windows-only for now.",
                None,
            ));
        }
        self.store.ensure().map_err(|e| {
            McpError::internal_error(
                format!("Cannot create {}: {e}", self.store.dir().display()),
                None,
            )
        })
    }

    async fn run_helper(
        &self,
        args: Vec<String>,
        timeout_ms: u64,
    ) -> Result<CaptureReport, McpError> {
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        self.runner
            .run(&arg_refs, timeout_ms)
            .await
            .map_err(|e| McpError::internal_error(e.to_string(), None))
    }

    /// Summary text content plus, on request, the PNG inlined as base64
    /// image content. `ok:false` reports come back as error results.
    fn tool_result(
        report: &CaptureReport,
        summary: serde_json::Value,
        include_image: bool,
    ) -> Result<CallToolResult, McpError> {
        let mut content = vec![Content::json(summary)?];

        if include_image && report.ok {
            if let Some(ref path) = report.path {
                let bytes = std::fs::read(path).map_err(|e| {
                    McpError::internal_error(format!("Cannot read captured file: {e}"), None)
                })?;
                content.push(Content::image(
                    general_purpose::STANDARD.encode(bytes),
                    "image/png".to_string(),
                ));
            }
        }

        Ok(if report.ok {
            CallToolResult::success(content)
        } else {
            CallToolResult::error(content)
        })
    }
}

#[tool_router]
impl SnipServer {
    #[tool(
        name = "takeScreenshot",
        description = "Capture the full screen (all displays, or one monitor by 0-based index) to a PNG under ./screenshots. Optionally returns the image inline as base64."
    )]
    async fn take_screenshot(
        &self,
        Parameters(req): Parameters<FullScreenshotRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.ensure_ready()?;

        let all = req.all_monitors.unwrap_or(true);
        let include_image = req.include_image.unwrap_or(false);
        let timeout_ms = req.timeout_ms.unwrap_or(DEFAULT_FULL_TIMEOUT_MS);
        let out = self.store.stamped_path("full");

        let mut args = vec![
            "--mode".to_string(),
            "full".to_string(),
            "--out".to_string(),
            out.display().to_string(),
        ];
        if all {
            args.push("--all".to_string());
        }
        if let Some(monitor) = req.monitor {
            args.push("--monitor".to_string());
            args.push(monitor.to_string());
        }

        let report = self.run_helper(args, timeout_ms).await?;
        let summary = json!({
            "ok": report.ok,
            "cancelled": report.was_cancelled(),
            "path": out.display().to_string(),
            "rect": report.rect,
            "width": report.width,
            "height": report.height,
            "mode": "full",
            "allMonitors": all,
            "monitor": req.monitor,
        });

        Self::tool_result(&report, summary, include_image)
    }

    #[tool(
        name = "takeSelectedAreaScreenshot",
        description = "Show an interactive drag-selection overlay and capture the chosen region to a PNG under ./screenshots. The user can cancel with Esc."
    )]
    async fn take_selected_area_screenshot(
        &self,
        Parameters(req): Parameters<RegionScreenshotRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.ensure_ready()?;

        let include_image = req.include_image.unwrap_or(false);
        let timeout_ms = req.timeout_ms.unwrap_or(DEFAULT_REGION_TIMEOUT_MS);
        let out = self.store.stamped_path("region");

        let mut args = vec![
            "--mode".to_string(),
            "region".to_string(),
            "--out".to_string(),
            out.display().to_string(),
        ];
        if let Some(ref prompt) = req.prompt {
            args.push("--prompt".to_string());
            args.push(prompt.clone());
        }

        let report = self.run_helper(args, timeout_ms).await?;
        let summary = json!({
            "ok": report.ok,
            "cancelled": report.was_cancelled(),
            "path": out.display().to_string(),
            "rect": report.rect,
            "width": report.width,
            "height": report.height,
            "mode": "region",
        });

        Self::tool_result(&report, summary, include_image)
    }

    #[tool(
        name = "listScreenshots",
        description = "List saved screenshots in ./screenshots, newest first, with path, size and creation time."
    )]
    async fn list_screenshots(
        &self,
        Parameters(req): Parameters<ListScreenshotsRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.ensure_ready()?;

        let limit = req.limit.unwrap_or(DEFAULT_LIST_LIMIT);
        let items = self.store.list(limit).map_err(|e| {
            McpError::internal_error(
                format!("Cannot list {}: {e}", self.store.dir().display()),
                None,
            )
        })?;

        Ok(CallToolResult::success(vec![Content::json(
            json!({ "items": items }),
        )?]))
    }
}

#[tool_handler]
impl ServerHandler for SnipServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Screenshot tools for Windows. Use 'takeScreenshot' for a \
                 non-interactive full-screen capture (all displays by default, \
                 or one monitor by index), 'takeSelectedAreaScreenshot' to let \
                 the user drag-select a region on screen, and \
                 'listScreenshots' to enumerate previous captures. Captures \
                 are saved as PNG under ./screenshots; set includeImage to \
                 also receive the PNG inline as base64."
                    .into(),
            ),
        }
    }
}
