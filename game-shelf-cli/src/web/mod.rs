//! HTTP surface for the catalog handlers.
//!
//! Every request opens its own [`SqliteSession`] on a blocking thread, runs
//! exactly one handler against it, and drops it. Rendered pages are returned
//! as JSON; redirects are `303 See Other`.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;

use game_shelf_db::SqliteSession;
use game_shelf_catalog::{GameForm, GameId, PlatformId};
use game_shelf_lib::{HandlerError, HandlerResult, Outcome, handler};

use crate::CliError;

#[derive(Clone)]
pub(crate) struct AppState {
    db_path: Arc<PathBuf>,
}

impl AppState {
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self {
            db_path: Arc::new(db_path),
        }
    }
}

/// Body of the add/remove platform posts. The add form names the game `id`.
#[derive(Debug, Deserialize)]
struct PlatformLinkForm {
    #[serde(alias = "id")]
    game_id: GameId,
    platform_id: PlatformId,
}

pub(crate) fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/games") }))
        .route("/games", get(list))
        .route("/games/details", get(detail_missing))
        .route("/games/details/{id}", get(detail))
        .route("/games/create", get(create_form).post(create_submit))
        .route("/games/edit", get(edit_missing))
        .route("/games/edit/{id}", get(edit_form).post(edit_submit))
        .route("/games/add-platform", post(add_platform))
        .route("/games/remove-platform", post(remove_platform))
        .route("/games/delete", get(delete_missing))
        .route("/games/delete/{id}", get(delete_form).post(delete_submit))
        .with_state(state)
}

/// Bind `bind` and serve until Ctrl-C.
pub(crate) async fn serve(state: AppState, bind: &str) -> Result<(), CliError> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|e| CliError::server(format!("Failed to bind {}: {}", bind, e)))?;
    let app = build_router(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CliError::server(e.to_string()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down");
}

async fn list(State(state): State<AppState>) -> Result<Response, WebError> {
    run_blocking(&state, |s| handler::list(s)).await
}

async fn detail(
    State(state): State<AppState>,
    Path(id): Path<GameId>,
) -> Result<Response, WebError> {
    run_blocking(&state, move |s| handler::detail(s, Some(id))).await
}

async fn detail_missing(State(state): State<AppState>) -> Result<Response, WebError> {
    run_blocking(&state, |s| handler::detail(s, None)).await
}

async fn create_form(State(state): State<AppState>) -> Result<Response, WebError> {
    run_blocking(&state, |s| handler::create_form(s)).await
}

async fn create_submit(
    State(state): State<AppState>,
    Form(form): Form<GameForm>,
) -> Result<Response, WebError> {
    run_blocking(&state, move |s| handler::create_submit(s, form)).await
}

async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<GameId>,
) -> Result<Response, WebError> {
    run_blocking(&state, move |s| handler::edit_form(s, Some(id))).await
}

async fn edit_missing(State(state): State<AppState>) -> Result<Response, WebError> {
    run_blocking(&state, |s| handler::edit_form(s, None)).await
}

async fn edit_submit(
    State(state): State<AppState>,
    Path(id): Path<GameId>,
    Form(form): Form<GameForm>,
) -> Result<Response, WebError> {
    run_blocking(&state, move |s| handler::edit_submit(s, id, form)).await
}

async fn add_platform(
    State(state): State<AppState>,
    Form(link): Form<PlatformLinkForm>,
) -> Result<Response, WebError> {
    run_blocking(&state, move |s| {
        handler::add_platform(s, link.game_id, link.platform_id)
    })
    .await
}

async fn remove_platform(
    State(state): State<AppState>,
    Form(link): Form<PlatformLinkForm>,
) -> Result<Response, WebError> {
    run_blocking(&state, move |s| {
        handler::remove_platform(s, link.game_id, link.platform_id)
    })
    .await
}

async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<GameId>,
) -> Result<Response, WebError> {
    run_blocking(&state, move |s| handler::delete_form(s, Some(id))).await
}

async fn delete_missing(State(state): State<AppState>) -> Result<Response, WebError> {
    run_blocking(&state, |s| handler::delete_form(s, None)).await
}

async fn delete_submit(
    State(state): State<AppState>,
    Path(id): Path<GameId>,
) -> Result<Response, WebError> {
    run_blocking(&state, move |s| handler::delete_submit(s, id)).await
}

/// Run one handler against a fresh session on the blocking pool.
async fn run_blocking<F>(state: &AppState, f: F) -> Result<Response, WebError>
where
    F: FnOnce(&mut SqliteSession) -> HandlerResult<Outcome> + Send + 'static,
{
    let db_path = Arc::clone(&state.db_path);
    let outcome = tokio::task::spawn_blocking(move || {
        let mut session = SqliteSession::open(&db_path)
            .map_err(|e| WebError::internal(format!("Failed to open catalog database: {}", e)))?;
        f(&mut session).map_err(WebError::from)
    })
    .await
    .map_err(|e| WebError::internal(format!("Request task failed: {}", e)))??;

    Ok(into_response(outcome))
}

fn into_response(outcome: Outcome) -> Response {
    match outcome {
        Outcome::Render(page) => (StatusCode::OK, Json(page)).into_response(),
        Outcome::Redirect(route) => Redirect::to(route.path()).into_response(),
    }
}

#[derive(Debug)]
struct WebError {
    status: StatusCode,
    message: String,
}

impl WebError {
    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<HandlerError> for WebError {
    fn from(e: HandlerError) -> Self {
        let status = match &e {
            e if e.is_not_found() => StatusCode::NOT_FOUND,
            HandlerError::Conflict { .. } => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: e.to_string(),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            log::error!("{} {}", self.status, self.message);
        } else {
            log::debug!("{} {}", self.status, self.message);
        }
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, header};
    use game_shelf_catalog::{GameDraft, Genre, Platform};
    use tower::ServiceExt;

    struct Fixture {
        _dir: tempfile::TempDir,
        db_path: PathBuf,
        game_id: GameId,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("catalog.db");
        let conn = game_shelf_db::open_database(&db_path).unwrap();
        game_shelf_db::upsert_genre(
            &conn,
            &Genre {
                id: 1,
                name: "RPG".into(),
            },
        )
        .unwrap();
        game_shelf_db::upsert_platform(
            &conn,
            &Platform {
                id: 10,
                name: "SNES".into(),
            },
        )
        .unwrap();
        let game_id = game_shelf_db::insert_game(
            &conn,
            &GameDraft {
                id: None,
                name: "Chrono Trigger".into(),
                image: None,
                release_year: 1995,
                genre_id: 1,
                version: None,
            },
        )
        .unwrap();
        Fixture {
            _dir: dir,
            db_path,
            game_id,
        }
    }

    fn app(f: &Fixture) -> Router {
        build_router(AppState::new(f.db_path.clone()))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_form(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn location(response: &Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
    }

    #[tokio::test]
    async fn test_root_redirects_to_list() {
        let f = fixture();
        let response = app(&f).oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/games");
    }

    #[tokio::test]
    async fn test_list_renders_games() {
        let f = fixture();
        let response = app(&f).oneshot(get("/games")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["view"], "List");
        assert_eq!(body["model"][0]["name"], "Chrono Trigger");
        assert_eq!(body["model"][0]["genre"]["name"], "RPG");
    }

    #[tokio::test]
    async fn test_detail_missing_and_unknown_are_404() {
        let f = fixture();
        let response = app(&f).oneshot(get("/games/details")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app(&f).oneshot(get("/games/details/999")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert!(body["error"].as_str().unwrap().contains("999"));
    }

    #[tokio::test]
    async fn test_create_submit_redirects() {
        let f = fixture();
        let response = app(&f)
            .oneshot(post_form(
                "/games/create",
                "name=Secret+of+Mana&release_year=1993&genre_id=1&image=",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/games");

        let body = json_body(app(&f).oneshot(get("/games")).await.unwrap()).await;
        assert_eq!(body["model"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_invalid_rerenders_form() {
        let f = fixture();
        let response = app(&f)
            .oneshot(post_form("/games/create", "name=&release_year=1993&genre_id=1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["view"], "Create");
        assert!(!body["model"]["errors"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_ignores_fields_outside_the_form() {
        let f = fixture();
        let response = app(&f)
            .oneshot(post_form(
                "/games/create",
                "id=77&name=Secret+of+Mana&release_year=1993&genre_id=1&version=9\
                 &platforms=10&Platforms%5B0%5D.Id=10&created_at=1990-01-01",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/games");

        let conn = game_shelf_db::open_database(&f.db_path).unwrap();
        let created = game_shelf_db::list_games(&conn)
            .unwrap()
            .into_iter()
            .find(|g| g.name == "Secret of Mana")
            .unwrap();
        assert_ne!(created.id, 77);
        assert_eq!(created.version, 1);
        assert!(game_shelf_db::platforms_for_game(&conn, created.id)
            .unwrap()
            .is_empty());
        assert_eq!(game_shelf_db::catalog_stats(&conn).unwrap().platform_links, 0);
    }

    #[tokio::test]
    async fn test_edit_with_stale_version_conflicts() {
        let f = fixture();
        let id = f.game_id;

        let fresh = format!(
            "id={id}&name=Chrono+Trigger+DS&release_year=2008&genre_id=1&version=1"
        );
        let response = app(&f)
            .oneshot(post_form(&format!("/games/edit/{id}"), &fresh))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        // Same token again: the row has moved on to version 2
        let response = app(&f)
            .oneshot(post_form(&format!("/games/edit/{id}"), &fresh))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_edit_with_mismatched_id_is_404() {
        let f = fixture();
        let id = f.game_id;
        let body = format!("id={}&name=X&release_year=1995&genre_id=1", id + 1);
        let response = app(&f)
            .oneshot(post_form(&format!("/games/edit/{id}"), &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_add_and_remove_platform() {
        let f = fixture();
        let id = f.game_id;

        for _ in 0..2 {
            let response = app(&f)
                .oneshot(post_form(
                    "/games/add-platform",
                    &format!("id={id}&platform_id=10"),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let body = json_body(response).await;
            assert_eq!(body["view"], "Edit");
            assert_eq!(body["model"]["platforms"].as_array().unwrap().len(), 1);
        }

        let response = app(&f)
            .oneshot(post_form(
                "/games/remove-platform",
                &format!("game_id={id}&platform_id=10"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert!(body["model"]["platforms"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_platform_unknown_game_is_404() {
        let f = fixture();
        let response = app(&f)
            .oneshot(post_form("/games/add-platform", "id=999&platform_id=10"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_submit_always_redirects() {
        let f = fixture();
        let id = f.game_id;
        for _ in 0..2 {
            let response = app(&f)
                .oneshot(post_form(&format!("/games/delete/{id}"), ""))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::SEE_OTHER);
            assert_eq!(location(&response), "/games");
        }

        let response = app(&f)
            .oneshot(get(&format!("/games/delete/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
