//! Blog front-end server
//!
//! Three surfaces: the server-rendered home page, the server-rendered post
//! detail page, and a JSON endpoint the home page's "load more" button
//! calls to fetch the next page of summaries.

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::cms::{
    CmsError, ContentSource, Ordering, PageCursor, Predicate, PrismicClient, QueryOptions,
    SortKey, SortOrder,
};
use crate::config::SiteConfig;
use crate::content::{PostDetail, PostSummary};
use crate::helpers::html::render_rich_text;
use crate::navigation::{resolve_navigation, NavigationLinks};
use crate::pagination::PaginationState;
use crate::templates::TemplateRenderer;
use crate::Publica;

/// Shared server state
struct ServerState {
    config: SiteConfig,
    client: PrismicClient,
    templates: TemplateRenderer,
}

/// Start the blog server
pub async fn start(app: &Publica, ip: &str, port: u16, open: bool) -> Result<()> {
    let state = Arc::new(ServerState {
        config: app.config.clone(),
        client: PrismicClient::new(&app.config)?,
        templates: TemplateRenderer::new()?,
    });

    let router = Router::new()
        .route("/", get(index_handler))
        .route("/post/:uid", get(post_handler))
        .route("/api/posts", get(posts_api_handler))
        .route("/assets/style.css", get(stylesheet_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

/// Home page: first page of posts, newest first, with the load-more cursor.
async fn index_handler(State(state): State<Arc<ServerState>>) -> Response {
    let predicate = Predicate::at("document.type", &state.config.document_type);
    let options = QueryOptions {
        page_size: state.config.per_page,
        orderings: Some(Ordering::new(
            SortKey::LastPublicationDate,
            SortOrder::Desc,
        )),
        after: None,
    };

    let response = match state.client.query(&predicate, &options).await {
        Ok(response) => response,
        Err(e) => return cms_error_response(e),
    };

    let next_page = response.next_page.clone();
    let mut posts = Vec::with_capacity(response.results.len());
    for raw in response.results {
        match PostSummary::from_raw(raw, &state.config) {
            Ok(post) => posts.push(post),
            Err(e) => return cms_error_response(e),
        }
    }

    let mut context = tera::Context::new();
    context.insert("site", &state.config);
    context.insert("featured", &posts.first());
    context.insert("posts", &posts.get(1..).unwrap_or_default());
    context.insert("next_page", &next_page);

    render(&state, "index.html", &context, StatusCode::OK)
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    cursor: Option<String>,
    #[serde(default = "default_page")]
    page: u32,
}

fn default_page() -> u32 {
    1
}

#[derive(Debug, Serialize)]
struct PageResponse {
    results: Vec<PostSummary>,
    next_page: Option<PageCursor>,
    page: u32,
}

/// JSON endpoint behind the "load more" button.
///
/// The browser owns the already-rendered items; this resumes the pagination
/// state from the cursor it sends, loads one page, and returns the delta. A
/// missing cursor is the exhausted no-op case.
async fn posts_api_handler(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageResponse>, (StatusCode, String)> {
    let mut pagination =
        PaginationState::resume(query.cursor.map(PageCursor::new), query.page);

    pagination
        .load_next_page(&state.client, &state.config)
        .await
        .map_err(|e| {
            tracing::error!("failed to load next page: {}", e);
            (StatusCode::BAD_GATEWAY, e.to_string())
        })?;

    Ok(Json(PageResponse {
        results: pagination.items,
        next_page: pagination.cursor,
        page: pagination.page_number,
    }))
}

/// Post detail page with previous/next links.
async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(uid): Path<String>,
) -> Response {
    let raw = match state
        .client
        .get_by_uid(&state.config.document_type, &uid)
        .await
    {
        Ok(raw) => raw,
        Err(CmsError::NotFound(_)) => {
            let mut context = tera::Context::new();
            context.insert("site", &state.config);
            return render(&state, "fallback.html", &context, StatusCode::NOT_FOUND);
        }
        Err(e) => return cms_error_response(e),
    };

    let document_id = raw.id.clone();
    let post = match PostDetail::from_raw(raw, &state.config) {
        Ok(post) => post,
        Err(e) => return cms_error_response(e),
    };

    // Navigation failures degrade to a post without links, never a failed
    // page.
    let navigation = match resolve_navigation(&state.client, &state.config, &document_id).await {
        Ok(navigation) => navigation,
        Err(e) => {
            tracing::warn!("navigation resolution failed for {}: {}", uid, e);
            NavigationLinks::default()
        }
    };

    #[derive(Serialize)]
    struct SectionView {
        heading: String,
        body_html: String,
    }

    let sections: Vec<SectionView> = post
        .content
        .iter()
        .map(|section| SectionView {
            heading: section.heading.clone(),
            body_html: render_rich_text(&section.body),
        })
        .collect();

    let mut context = tera::Context::new();
    context.insert("site", &state.config);
    context.insert("post", &post);
    context.insert("sections", &sections);
    context.insert("navigation", &navigation);

    render(&state, "post.html", &context, StatusCode::OK)
}

async fn stylesheet_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        include_str!("../templates/views/style.css"),
    )
}

fn render(
    state: &ServerState,
    template: &str,
    context: &tera::Context,
    status: StatusCode,
) -> Response {
    match state.templates.render(template, context) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("template render failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

fn cms_error_response(error: CmsError) -> Response {
    tracing::error!("content repository error: {}", error);
    (StatusCode::BAD_GATEWAY, "Upstream content error").into_response()
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
