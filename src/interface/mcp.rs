//! MCP Server for bookshelf-mcp
//!
//! MCP Protocol (stdio) <-> application::LibraryService
//!
//! 5 tools: add_book, remove_book, search_book, view_library, list_titles

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Context;
use rmcp::{
    handler::server::{tool::ToolCallContext, tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolRequestParams, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
    transport::stdio,
    ErrorData as McpError, ServerHandler, ServiceExt,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::application::error::AppError;
use crate::application::render::{RenderFormat, Renderer};
use crate::application::service::LibraryService;
use crate::domain::model::book::AddBookRequest;
use crate::infra::json_store::JsonLibraryRepository;

type Service = LibraryService<JsonLibraryRepository>;

// =============================================================================
// Public entry point
// =============================================================================

/// Loads the library and serves it over stdio until the client disconnects,
/// then saves once more. The final save runs even when the transport fails.
pub async fn run(library_path: PathBuf) -> anyhow::Result<()> {
    let repo = JsonLibraryRepository::new(&library_path);
    let library = LibraryService::open(repo)
        .with_context(|| format!("Failed to open library {}", library_path.display()))?;
    info!(
        path = %library_path.display(),
        books = library.library().len(),
        "serving library"
    );

    let server = LibraryMcpServer::new(library);
    let served = async {
        let service = server.clone().serve(stdio()).await?;
        service.waiting().await?;
        anyhow::Ok(())
    }
    .await;

    let saved = server.save_on_exit();
    match served {
        Ok(()) => saved,
        Err(e) => {
            if let Err(save_err) = saved {
                error!("{save_err:#}");
            }
            Err(e)
        }
    }
}

// =============================================================================
// MCP Server
// =============================================================================

#[derive(Clone)]
struct LibraryMcpServer {
    library: Arc<Mutex<Service>>,
    tool_router: ToolRouter<Self>,
}

impl LibraryMcpServer {
    fn new(library: Service) -> Self {
        Self {
            library: Arc::new(Mutex::new(library)),
            tool_router: Self::tool_router(),
        }
    }

    /// One command at a time: every tool holds this lock for its whole run.
    fn lock(&self) -> Result<MutexGuard<'_, Service>, McpError> {
        self.library
            .lock()
            .map_err(|_| McpError::internal_error("Lock poisoned", None))
    }

    /// Final write of the in-memory library when the session ends.
    fn save_on_exit(&self) -> anyhow::Result<()> {
        self.library
            .lock()
            .map_err(|_| anyhow::anyhow!("library lock poisoned"))?
            .flush()
            .context("Failed to save library on exit")?;
        info!("library saved on exit");
        Ok(())
    }

    /// Domain rejections are warnings the user can act on; everything else is
    /// an internal failure (the change did not persist).
    fn to_mcp_error(e: AppError) -> McpError {
        if e.is_user_error() {
            McpError::invalid_params(format!("{e}"), None)
        } else {
            McpError::internal_error(format!("{e}"), None)
        }
    }
}

// =============================================================================
// ServerHandler impl
// =============================================================================

impl ServerHandler for LibraryMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "bookshelf-mcp".to_string(),
                title: Some("Bookshelf MCP — Personal Library Manager".to_string()),
                description: Some(
                    "Track the books you own: add, remove, look up, and see how many you have read."
                        .to_string(),
                ),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Manage a personal book collection stored in a local JSON file.\n\
                 \n\
                 Tools: `add_book` to record a book, `list_titles` to see what can be \
                 selected, then `search_book` / `remove_book` by exact title. \
                 `view_library` shows totals and the percentage read."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let tool_ctx = ToolCallContext::new(self, request, context);
        self.tool_router.call(tool_ctx).await
    }
}

// =============================================================================
// Request types
// =============================================================================

/// Binary Yes/No choice → read flag.
fn parse_read_status(s: &str) -> Result<bool, McpError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" => Ok(true),
        "no" | "n" | "false" => Ok(false),
        other => Err(McpError::invalid_params(
            format!("Unknown read status: '{other}'. Use: yes, no"),
            None,
        )),
    }
}

fn parse_format(s: Option<&str>) -> Result<RenderFormat, McpError> {
    match s {
        Some("json") => Ok(RenderFormat::Json),
        Some("markdown") | None => Ok(RenderFormat::Markdown),
        Some(other) => Err(McpError::invalid_params(
            format!("Unknown format: '{other}'. Use: markdown, json"),
            None,
        )),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpAddBookRequest {
    #[schemars(description = "Book title (required)")]
    pub title: String,
    #[schemars(description = "Author name (required)")]
    pub author: String,
    #[schemars(description = "Publication year, 1000-2025")]
    pub year: i32,
    #[schemars(description = "Genre (required)")]
    pub genre: String,
    #[schemars(description = "Have you read this book? 'yes' or 'no'")]
    pub read: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpRemoveBookRequest {
    #[schemars(
        description = "Exact title from `list_titles`. Every book with this title is removed."
    )]
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpSearchBookRequest {
    #[schemars(description = "Exact title from `list_titles`. The first match is shown.")]
    pub title: String,
    #[schemars(description = "Output format: 'markdown' (default) or 'json'")]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpViewLibraryRequest {
    #[schemars(description = "Output format: 'markdown' (default) or 'json'")]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpListTitlesRequest {}

// =============================================================================
// Tool implementations
// =============================================================================

#[tool_router]
impl LibraryMcpServer {
    #[tool(
        name = "add_book",
        description = "Add a book to the library. Title, author, and genre must be non-empty; year must be 1000-2025; read is 'yes' or 'no'. Duplicate titles are allowed.",
        annotations(
            read_only_hint = false,
            destructive_hint = false,
            idempotent_hint = false,
            open_world_hint = false
        )
    )]
    async fn add_book(
        &self,
        Parameters(req): Parameters<McpAddBookRequest>,
    ) -> Result<CallToolResult, McpError> {
        let read = parse_read_status(&req.read)?;
        let add_req = AddBookRequest {
            title: req.title,
            author: req.author,
            year: req.year,
            genre: req.genre,
            read,
        };

        let book = self
            .lock()?
            .add_book(add_req)
            .map_err(Self::to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(format!(
            "Book '{}' added successfully!",
            book.title()
        ))]))
    }

    #[tool(
        name = "remove_book",
        description = "Remove a book by exact title (see `list_titles`). All books sharing that title are removed.",
        annotations(
            read_only_hint = false,
            destructive_hint = true,
            idempotent_hint = false,
            open_world_hint = false
        )
    )]
    async fn remove_book(
        &self,
        Parameters(req): Parameters<McpRemoveBookRequest>,
    ) -> Result<CallToolResult, McpError> {
        let removed = self
            .lock()?
            .remove_book(&req.title)
            .map_err(Self::to_mcp_error)?;

        let suffix = if removed > 1 {
            format!(" ({removed} copies)")
        } else {
            String::new()
        };
        Ok(CallToolResult::success(vec![Content::text(format!(
            "'{}' removed from the library!{}",
            req.title, suffix
        ))]))
    }

    #[tool(
        name = "search_book",
        description = "Show title, author, year, genre, and read status of the first book with the exact title (see `list_titles`).",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            open_world_hint = false
        )
    )]
    async fn search_book(
        &self,
        Parameters(req): Parameters<McpSearchBookRequest>,
    ) -> Result<CallToolResult, McpError> {
        let format = parse_format(req.format.as_deref())?;
        let svc = self.lock()?;
        let book = svc.search_book(&req.title).map_err(Self::to_mcp_error)?;
        let output = Renderer::book(book, format).map_err(Self::to_mcp_error)?;
        Ok(CallToolResult::success(vec![Content::text(output)]))
    }

    #[tool(
        name = "view_library",
        description = "Library statistics: total books, books read, and percentage read.",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            open_world_hint = false
        )
    )]
    async fn view_library(
        &self,
        Parameters(req): Parameters<McpViewLibraryRequest>,
    ) -> Result<CallToolResult, McpError> {
        let format = parse_format(req.format.as_deref())?;
        let stats = self.lock()?.stats();
        let output = Renderer::stats(&stats, format).map_err(Self::to_mcp_error)?;
        Ok(CallToolResult::success(vec![Content::text(output)]))
    }

    #[tool(
        name = "list_titles",
        description = "List the titles currently in the library. Use these with `search_book` and `remove_book`.",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            open_world_hint = false
        )
    )]
    async fn list_titles(
        &self,
        #[allow(unused_variables)] Parameters(_req): Parameters<McpListTitlesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let svc = self.lock()?;
        let titles = svc.titles();

        if titles.is_empty() {
            return Ok(CallToolResult::success(vec![Content::text(
                "Library is empty. Use `add_book` to add books.",
            )]));
        }

        Ok(CallToolResult::success(vec![Content::text(
            Renderer::titles_markdown(&titles),
        )]))
    }
}

// =============================================================================
// Tests
// =============================================================================
