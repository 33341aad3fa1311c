use std::net::SocketAddr;

use anyhow::Context;
use axum::body::Body;
use axum::extract::{DefaultBodyLimit, FromRequest, State};
use axum::http::{header, Request, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::form::PasteForm;
use crate::name::PasteName;
use crate::page::{render_paste, INVALID_URL};
use crate::storage::{FileStorage, Storage};
use crate::{ApiError, App};

pub async fn run(app: App) -> anyhow::Result<()> {
    let addr = SocketAddr::new(app.config.address, app.config.port);

    info!(
        "starting server: http://{addr}, pastes in {}",
        app.storage.dir().display()
    );

    axum::Server::try_bind(&addr)
        .with_context(|| format!("failed to bind {addr}"))?
        .serve(router(app).into_make_service())
        .await?;

    Ok(())
}

pub fn router(app: App) -> Router {
    Router::new()
        .route("/", get(show_paste).post(save_paste).head(head_paste))
        .route("/*name", get(show_paste).post(save_paste).head(head_paste))
        .layer(DefaultBodyLimit::max(app.config.limits.max_upload_size))
        .layer(TraceLayer::new_for_http())
        .with_state(app)
}

fn invalid_url(uri: &Uri) -> Html<String> {
    debug!("invalid paste name: {}", uri.path());
    Html(INVALID_URL.to_owned())
}

async fn show_paste(
    State(mut storage): State<FileStorage>,
    uri: Uri,
) -> crate::ApiResult<Html<String>> {
    let Ok(name) = PasteName::from_path(uri.path()) else {
        return Ok(invalid_url(&uri));
    };

    let content = storage.get_or_create(&name).await?;
    Ok(Html(render_paste(&name, &content)))
}

async fn save_paste(
    State(mut storage): State<FileStorage>,
    request: Request<Body>,
) -> crate::ApiResult<Response> {
    // the name is checked before the body is read
    let Ok(name) = PasteName::from_path(request.uri().path()) else {
        return Ok(invalid_url(request.uri()).into_response());
    };

    let form = PasteForm::from_request(request, &()).await?;
    let content = form.value("paste").ok_or(ApiError::MissingPaste)?;

    storage.put(&name, &content).await?;

    Ok((
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, name.path())],
    )
        .into_response())
}

async fn head_paste() -> impl IntoResponse {
    [(header::CONTENT_TYPE, "text/html")]
}
