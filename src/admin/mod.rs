//! Admin HTTP surface: list, add, edit and delete events through forms.

mod page;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::Deserialize;
use tokio::net::{TcpListener, ToSocketAddrs};
use tower_http::trace::TraceLayer;

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::model::{Event, NewEvent};

/// Shared state for admin handlers.
#[derive(Clone)]
pub struct AdminState {
    pub catalog: Arc<Catalog>,
}

/// Build the admin router.
pub fn router(state: AdminState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/events", get(list_events))
        .route("/add", post(add_event))
        .route("/edit", post(edit_event))
        .route("/delete", post(delete_event))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the admin router until `shutdown` resolves.
///
/// `addr` may name a host (`("localhost", 10000)`), not only an IP.
pub async fn serve(
    addr: impl ToSocketAddrs,
    state: AdminState,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "admin surface listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

/// Fields shared by the add and edit forms. `aliases` is comma-separated.
#[derive(Debug, Deserialize)]
pub struct EventForm {
    pub name: String,
    #[serde(default)]
    pub aliases: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub reward: String,
}

impl EventForm {
    fn into_event(self) -> Event {
        NewEvent::new(self.name.trim(), self.start.trim(), self.end.trim())
            .aliases_csv(&self.aliases)
            .content(self.content)
            .reward(self.reward)
            .build()
    }
}

/// The edit form carries the name the event had when the page was rendered.
#[derive(Debug, Deserialize)]
pub struct EditForm {
    pub original_name: String,
    pub name: String,
    #[serde(default)]
    pub aliases: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub reward: String,
}

impl EditForm {
    fn split(self) -> (String, EventForm) {
        let form = EventForm {
            name: self.name,
            aliases: self.aliases,
            start: self.start,
            end: self.end,
            content: self.content,
            reward: self.reward,
        };
        (self.original_name, form)
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    pub name: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn index(State(state): State<AdminState>) -> std::result::Result<Html<String>, AdminError> {
    let events = with_catalog(&state, |catalog| catalog.list()).await?;
    Ok(Html(page::render(&events)))
}

async fn list_events(
    State(state): State<AdminState>,
) -> std::result::Result<Json<Vec<Event>>, AdminError> {
    Ok(Json(with_catalog(&state, |catalog| catalog.list()).await?))
}

async fn add_event(
    State(state): State<AdminState>,
    Form(form): Form<EventForm>,
) -> std::result::Result<Redirect, AdminError> {
    with_catalog(&state, move |catalog| catalog.add(form.into_event())).await?;
    Ok(Redirect::to("/"))
}

async fn edit_event(
    State(state): State<AdminState>,
    Form(form): Form<EditForm>,
) -> std::result::Result<Redirect, AdminError> {
    let (original_name, form) = form.split();
    with_catalog(&state, move |catalog| {
        catalog.update(&original_name, form.into_event())
    })
    .await?;
    Ok(Redirect::to("/"))
}

async fn delete_event(
    State(state): State<AdminState>,
    Form(form): Form<DeleteForm>,
) -> std::result::Result<Redirect, AdminError> {
    with_catalog(&state, move |catalog| catalog.remove(&form.name)).await?;
    Ok(Redirect::to("/"))
}

/// Run a catalog operation on the blocking pool; stores do file I/O.
async fn with_catalog<T, F>(state: &AdminState, f: F) -> std::result::Result<T, AdminError>
where
    F: FnOnce(&Catalog) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let catalog = Arc::clone(&state.catalog);
    tokio::task::spawn_blocking(move || f(&catalog))
        .await
        .map_err(|e| Error::Other(format!("catalog task failed: {e}")))?
        .map_err(AdminError::from)
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Maps catalog errors onto HTTP status codes.
#[derive(Debug)]
pub struct AdminError(Error);

impl From<Error> for AdminError {
    fn from(value: Error) -> Self {
        Self(value)
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Invalid(_) | Error::MalformedDate { .. } => StatusCode::BAD_REQUEST,
            _ => {
                tracing::error!(error = %self.0, "admin request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, self.0.to_string()).into_response()
    }
}
