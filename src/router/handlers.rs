use axum::{
    Router,
    body::Bytes,
    extract::{Extension, Path},
    http::StatusCode,
    routing::{get, put},
};
use std::sync::Arc;

use super::forwarder::Forwarder;
use super::service::DocumentRouter;
use super::types::{NodeResponse, RouterError};
use crate::registry::types::RingChange;

/// HTTP surface of the router.
///
/// `/add/...` is a static prefix and wins over the `/{api_key}/...` pattern.
pub fn app<F: Forwarder>(router: Arc<DocumentRouter<F>>) -> Router {
    Router::new()
        .route(
            "/api_key/:key",
            get(handle_register_api_key::<F>).delete(handle_revoke_api_key::<F>),
        )
        .route(
            "/ring",
            get(handle_list_ring::<F>).delete(handle_clear_ring::<F>),
        )
        .route(
            "/node/:node",
            put(handle_add_node::<F>)
                .get(handle_node_position::<F>)
                .delete(handle_remove_node::<F>),
        )
        .route("/add/:api_key/:level", put(handle_store_document::<F>))
        .route(
            "/:api_key/:doc_key/:level",
            get(handle_fetch_document::<F>).delete(handle_delete_document::<F>),
        )
        .layer(Extension(router))
}

// --- API keys ---

pub async fn handle_register_api_key<F: Forwarder>(
    Extension(router): Extension<Arc<DocumentRouter<F>>>,
    Path(key): Path<String>,
) -> Result<(StatusCode, String), RouterError> {
    router.registry().register_api_key(&key).await?;
    Ok((
        StatusCode::CREATED,
        format!("key {} added to the service", key),
    ))
}

pub async fn handle_revoke_api_key<F: Forwarder>(
    Extension(router): Extension<Arc<DocumentRouter<F>>>,
    Path(key): Path<String>,
) -> Result<String, RouterError> {
    router.registry().revoke_api_key(&key).await?;
    Ok(format!("key {} removed from the service", key))
}

// --- Ring membership ---

pub async fn handle_list_ring<F: Forwarder>(
    Extension(router): Extension<Arc<DocumentRouter<F>>>,
) -> Result<String, RouterError> {
    let members = router.registry().ring_members().await?;
    if members.is_empty() {
        return Ok("The ring is empty".to_string());
    }
    Ok(members.join("\n"))
}

pub async fn handle_clear_ring<F: Forwarder>(
    Extension(router): Extension<Arc<DocumentRouter<F>>>,
) -> Result<String, RouterError> {
    router.registry().clear_ring().await?;
    Ok("All nodes have been removed".to_string())
}

pub async fn handle_add_node<F: Forwarder>(
    Extension(router): Extension<Arc<DocumentRouter<F>>>,
    Path(node): Path<String>,
) -> Result<(StatusCode, String), RouterError> {
    let msg = match router.registry().add_node(&node).await? {
        RingChange::Created => format!("Ring created and new node {} added to the ring", node),
        RingChange::Added => format!("new node {} added to the ring", node),
    };
    Ok((StatusCode::CREATED, msg))
}

pub async fn handle_node_position<F: Forwarder>(
    Extension(router): Extension<Arc<DocumentRouter<F>>>,
    Path(node): Path<String>,
) -> Result<String, RouterError> {
    let (owner, pos) = router.registry().node_position(&node).await?;
    Ok(format!(
        "the node {} is in position {}, owned by {}",
        node, pos, owner
    ))
}

pub async fn handle_remove_node<F: Forwarder>(
    Extension(router): Extension<Arc<DocumentRouter<F>>>,
    Path(node): Path<String>,
) -> Result<String, RouterError> {
    router.registry().remove_node(&node).await?;
    Ok(format!("node {} removed from the ring", node))
}

// --- Documents ---

pub async fn handle_store_document<F: Forwarder>(
    Extension(router): Extension<Arc<DocumentRouter<F>>>,
    Path((api_key, level)): Path<(String, String)>,
    body: Bytes,
) -> Result<NodeResponse, RouterError> {
    router.store(&api_key, &level, body).await
}

pub async fn handle_fetch_document<F: Forwarder>(
    Extension(router): Extension<Arc<DocumentRouter<F>>>,
    Path((api_key, doc_key, level)): Path<(String, String, String)>,
) -> Result<NodeResponse, RouterError> {
    router.fetch(&api_key, &doc_key, &level).await
}

pub async fn handle_delete_document<F: Forwarder>(
    Extension(router): Extension<Arc<DocumentRouter<F>>>,
    Path((api_key, doc_key, level)): Path<(String, String, String)>,
) -> Result<NodeResponse, RouterError> {
    router.delete(&api_key, &doc_key, &level).await
}
