//! NutriCalc MCP Server Implementation
//!
//! Exposes food lookup and search history as MCP tools.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::history::HistoryStore;
use crate::models::Variant;
use crate::nutrition::Resolver;
use crate::tools::history;
use crate::tools::lookup::{self, LookupRequest};
use crate::tools::status::StatusTracker;

/// NutriCalc MCP Service
#[derive(Clone)]
pub struct NutriCalcService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    resolver: Arc<Resolver>,
    history: Arc<std::sync::Mutex<HistoryStore>>,
    lookup_latency: Duration,
    tool_router: ToolRouter<NutriCalcService>,
}

impl NutriCalcService {
    pub fn new(
        database_path: PathBuf,
        resolver: Arc<Resolver>,
        history: HistoryStore,
        lookup_latency: Duration,
    ) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            resolver,
            history: Arc::new(std::sync::Mutex::new(history)),
            lookup_latency,
            tool_router: Self::tool_router(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LookupFoodParams {
    /// Food name, e.g. "banana" or "arroz integral"
    pub food_name: String,
    /// Serving size in grams (default 100)
    pub serving_size: Option<f64>,
    /// Preparation hint: auto, cooked or raw (default auto)
    pub variant: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct HistoryIndexParams {
    /// Position in the history list (0 = most recent)
    pub index: usize,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl NutriCalcService {
    // --- Status ---

    #[tool(description = "Get the current status of the NutriCalc service including build info, food catalog state, history size and process information")]
    async fn nutricalc_status(&self) -> Result<CallToolResult, McpError> {
        let history_entries = self
            .history
            .lock()
            .map_err(|_| McpError::internal_error("History lock poisoned", None))?
            .len();
        let tracker = self.status_tracker.lock().await;
        to_json(&tracker.get_status(&self.resolver, history_entries))
    }

    // --- Lookup ---

    #[tool(description = "Look up approximate nutrition facts for a food and serving size in grams. Records the search in the history.")]
    async fn lookup_food(&self, Parameters(p): Parameters<LookupFoodParams>) -> Result<CallToolResult, McpError> {
        let request = LookupRequest {
            food_name: p.food_name,
            serving_size: p.serving_size,
            variant: p.variant.as_deref().map(Variant::from_str).unwrap_or_default(),
        };
        let result = lookup::lookup_food(&self.resolver, &self.history, self.lookup_latency, request)
            .await
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Repeat the lookup stored at a history position")]
    async fn rerun_history_entry(&self, Parameters(p): Parameters<HistoryIndexParams>) -> Result<CallToolResult, McpError> {
        let result = lookup::rerun_history_entry(&self.resolver, &self.history, self.lookup_latency, p.index)
            .await
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    // --- History ---

    #[tool(description = "List recent searches, most recent first (at most 20)")]
    fn list_history(&self) -> Result<CallToolResult, McpError> {
        let now = chrono::Utc::now().timestamp_millis();
        let result = history::list_history(&self.history, now).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Remove one search from the history by position")]
    fn remove_history_entry(&self, Parameters(p): Parameters<HistoryIndexParams>) -> Result<CallToolResult, McpError> {
        let result = history::remove_history_entry(&self.history, p.index)
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Delete the whole search history")]
    fn clear_history(&self) -> Result<CallToolResult, McpError> {
        let result = history::clear_history(&self.history).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Search history totals: number of searches, distinct foods and date of the last search")]
    fn history_stats(&self) -> Result<CallToolResult, McpError> {
        let result = history::history_stats(&self.history).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for NutriCalcService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "nutricalc".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Nutrition Calculator".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Nutrition Calculator (NutriCalc) - approximate nutrition facts per serving. \
                 Values come from a local food table or a generic placeholder profile, not a live API. \
                 Lookup: lookup_food (food_name, serving_size in grams, variant auto/cooked/raw). \
                 History: list_history, rerun_history_entry, remove_history_entry, clear_history, history_stats. \
                 Status: nutricalc_status."
                    .into(),
            ),
        }
    }
}
