use axum::{
    Router,
    body::Bytes,
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, put},
};
use std::sync::Arc;

use super::backend::StorageError;
use super::mapping::TierMapping;
use super::protocol::{ENDPOINT_STORE, ENDPOINT_STORE_CONFIG, ENDPOINT_STORE_MAPPING};

/// HTTP surface of a storage node.
pub fn app(mapping: Arc<TierMapping>) -> Router {
    Router::new()
        .route(ENDPOINT_STORE_MAPPING, get(handle_store_mapping))
        .route(
            &format!("{}/:level/:route", ENDPOINT_STORE_CONFIG),
            put(handle_bind_level),
        )
        .route(
            &format!("{}/:level", ENDPOINT_STORE_CONFIG),
            delete(handle_unbind_level),
        )
        .route(
            &format!("{}/:key/:level", ENDPOINT_STORE),
            get(handle_get_document)
                .put(handle_put_document)
                .delete(handle_delete_document),
        )
        .layer(Extension(mapping))
}

impl IntoResponse for StorageError {
    fn into_response(self) -> Response {
        let status = match &self {
            StorageError::NotFound(_) | StorageError::LevelNotMapped(_) => StatusCode::NOT_FOUND,
            StorageError::AlreadyMapped(_) => StatusCode::CONFLICT,
            StorageError::InvalidKey(_) => StatusCode::BAD_REQUEST,
            StorageError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("Storage request failed: {}", self);
        } else {
            tracing::debug!("Storage request rejected: {}", self);
        }
        (status, self.to_string()).into_response()
    }
}

// Backends do blocking file I/O, keep it off the async workers.
async fn blocking<T, F>(work: F) -> Result<T, StorageError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| StorageError::Io(std::io::Error::other(e)))?
}

pub async fn handle_store_mapping(Extension(mapping): Extension<Arc<TierMapping>>) -> String {
    mapping
        .describe()
        .into_iter()
        .map(|(level, backend)| format!("level:{} -> {}\n", level, backend))
        .collect()
}

pub async fn handle_bind_level(
    Extension(mapping): Extension<Arc<TierMapping>>,
    Path((level, route)): Path<(String, String)>,
) -> Result<(StatusCode, String), StorageError> {
    let msg = format!(
        "new route {}, level {} added to storage mapping",
        route, level
    );
    blocking(move || mapping.bind(&level, &route)).await?;
    Ok((StatusCode::CREATED, msg))
}

pub async fn handle_unbind_level(
    Extension(mapping): Extension<Arc<TierMapping>>,
    Path(level): Path<String>,
) -> Result<String, StorageError> {
    mapping.unbind(&level)?;
    tracing::info!("Level {} unmapped", level);
    Ok(format!("route {} deleted", level))
}

pub async fn handle_get_document(
    Extension(mapping): Extension<Arc<TierMapping>>,
    Path((key, level)): Path<(String, String)>,
) -> Result<Bytes, StorageError> {
    blocking(move || mapping.get(&level, &key)).await
}

pub async fn handle_put_document(
    Extension(mapping): Extension<Arc<TierMapping>>,
    Path((key, level)): Path<(String, String)>,
    body: Bytes,
) -> Result<(StatusCode, String), StorageError> {
    let msg = format!("document {} stored at level {}", key, level);
    let size = body.len();
    blocking(move || mapping.set(&level, &key, body)).await?;
    tracing::debug!("{} ({} bytes)", msg, size);
    Ok((StatusCode::CREATED, msg))
}

pub async fn handle_delete_document(
    Extension(mapping): Extension<Arc<TierMapping>>,
    Path((key, level)): Path<(String, String)>,
) -> Result<String, StorageError> {
    let msg = format!("document {} deleted", key);
    blocking(move || mapping.unset(&level, &key)).await?;
    Ok(msg)
}
