//! HTTP surface of the review.
//!
//! One session behind one lock; every form post becomes a [`ReviewAction`]
//! and redirects back to the page.

use crate::cli::RunOptions;
use crate::page;
use crate::utils::browser;
use anyhow::{Context, Result};
use axum::extract::{Form, State};
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum::Router;
use review_core::{
    CmarkRenderer, Comment, ReviewAction, ReviewEvent, ReviewSession, SyntaxHighlighter,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};

struct ReviewState {
    session: ReviewSession,
    highlighter: SyntaxHighlighter,
}

/// Shared handler state.
#[derive(Clone)]
pub struct AppContext {
    state: Arc<Mutex<ReviewState>>,
    markdown: CmarkRenderer,
    finished: Arc<Notify>,
}

impl AppContext {
    pub fn new(session: ReviewSession, highlighter: SyntaxHighlighter) -> Self {
        Self {
            state: Arc::new(Mutex::new(ReviewState {
                session,
                highlighter,
            })),
            markdown: CmarkRenderer,
            finished: Arc::new(Notify::new()),
        }
    }

    /// Apply one action and wake the server when the review is done.
    async fn dispatch(&self, action: ReviewAction) -> Vec<ReviewEvent> {
        log::debug!("Action: {:?}", action);
        let events = self.state.lock().await.session.handle_action(action);
        for event in &events {
            match event {
                ReviewEvent::ValidationFailed(err) => log::info!("Rejected: {}", err),
                ReviewEvent::Finished(comments) => {
                    log::info!("Review finished with {} comment(s)", comments.len());
                    self.finished.notify_one();
                }
                other => log::debug!("Event: {:?}", other),
            }
        }
        events
    }

    async fn comments(&self) -> Vec<Comment> {
        self.state.lock().await.session.comments().to_vec()
    }

    async fn is_finished(&self) -> bool {
        self.state.lock().await.session.is_finished()
    }
}

#[derive(Debug, Deserialize)]
struct SelectFileForm {
    path: String,
}

#[derive(Debug, Deserialize)]
struct SelectLineForm {
    line: i64,
    #[serde(default)]
    shift: String,
}

#[derive(Debug, Deserialize)]
struct CommentForm {
    #[serde(default)]
    comment: String,
}

/// Build the router for a context.
pub fn router(context: AppContext) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/select-file", post(select_file))
        .route("/select-line", post(select_line))
        .route("/comment", post(add_comment))
        .route("/cancel", post(cancel_comment))
        .route("/toggle-file-render", post(toggle_file_render))
        .route("/toggle-comment-render", post(toggle_comment_render))
        .route("/finish", post(finish))
        .with_state(context)
}

async fn index(State(ctx): State<AppContext>) -> Html<String> {
    let mut guard = ctx.state.lock().await;
    let state = &mut *guard;
    if state.session.is_finished() {
        return Html(page::render_finished(state.session.comments().len()));
    }
    let view = state.session.view(&mut state.highlighter, &ctx.markdown);
    Html(page::render(&view))
}

async fn select_file(State(ctx): State<AppContext>, Form(form): Form<SelectFileForm>) -> Redirect {
    ctx.dispatch(ReviewAction::SelectFile(form.path)).await;
    Redirect::to("/")
}

async fn select_line(State(ctx): State<AppContext>, Form(form): Form<SelectLineForm>) -> Redirect {
    ctx.dispatch(ReviewAction::SelectLine {
        line: form.line,
        extend: form.shift == "1",
    })
    .await;
    Redirect::to(&format!("/#L{}", form.line))
}

async fn add_comment(State(ctx): State<AppContext>, Form(form): Form<CommentForm>) -> Redirect {
    ctx.dispatch(ReviewAction::AddComment(form.comment)).await;
    Redirect::to("/")
}

async fn cancel_comment(State(ctx): State<AppContext>) -> Redirect {
    ctx.dispatch(ReviewAction::CancelComment).await;
    Redirect::to("/")
}

async fn toggle_file_render(State(ctx): State<AppContext>) -> Redirect {
    ctx.dispatch(ReviewAction::ToggleFileRender).await;
    Redirect::to("/")
}

async fn toggle_comment_render(State(ctx): State<AppContext>) -> Redirect {
    ctx.dispatch(ReviewAction::ToggleCommentRender).await;
    Redirect::to("/")
}

async fn finish(State(ctx): State<AppContext>) -> Html<String> {
    ctx.dispatch(ReviewAction::Finish).await;
    Html(page::render_finished(ctx.comments().await.len()))
}

async fn shutdown_signal(finished: Arc<Notify>) {
    tokio::select! {
        _ = finished.notified() => log::info!("Shutting down after finish"),
        result = tokio::signal::ctrl_c() => match result {
            Ok(()) => log::info!("Interrupted, shutting down"),
            Err(e) => log::error!("Failed to listen for ctrl-c: {}", e),
        },
    }
}

/// Serve the review until it is finished.
///
/// Returns the comments on finish, or `None` when interrupted first.
pub async fn run(session: ReviewSession, options: &RunOptions) -> Result<Option<Vec<Comment>>> {
    let session = session
        .with_prompt(options.prompt.clone())
        .with_render_file(options.render_code)
        .with_render_comments(options.render_comments);
    let context = AppContext::new(session, SyntaxHighlighter::with_theme_name(&options.theme));
    let app = router(context.clone());

    let listener = tokio::net::TcpListener::bind((options.host.as_str(), options.port))
        .await
        .with_context(|| format!("bind {}:{}", options.host, options.port))?;
    let addr = listener.local_addr().context("read listener address")?;
    let url = format!("http://{}/", addr);
    log::info!("Review server listening on {}", addr);

    if !options.open_browser || !browser::open_url(&url).await {
        eprintln!("open this URL in your browser: {}", url);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(context.finished.clone()))
        .await
        .context("serve review")?;

    if context.is_finished().await {
        Ok(Some(context.comments().await))
    } else {
        Ok(None)
    }
}
