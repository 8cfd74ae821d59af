use axum::{
    body::Bytes,
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::registry::types::RegistryError;
use crate::ring::RingError;

#[derive(Debug, Error)]
pub enum RouterError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("invalid node address {0:?}, expected host|port")]
    InvalidNodeAddress(String),

    #[error("forwarding to {node} failed: {reason}")]
    Transport { node: String, reason: String },
}

impl RouterError {
    pub fn status(&self) -> StatusCode {
        match self {
            RouterError::Registry(err) => match err {
                RegistryError::Unauthorized => StatusCode::UNAUTHORIZED,
                RegistryError::Unavailable | RegistryError::RingNotInitialized => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                RegistryError::ApiKeyNotFound(_)
                | RegistryError::Ring(RingError::NodeNotFound(_)) => StatusCode::NOT_FOUND,
                RegistryError::ApiKeyExists(_)
                | RegistryError::Ring(RingError::DuplicateNode(_))
                | RegistryError::Ring(RingError::VirtualKeyCollision { .. }) => {
                    StatusCode::CONFLICT
                }
            },
            RouterError::InvalidNodeAddress(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RouterError::Transport { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for RouterError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }
        (status, self.to_string()).into_response()
    }
}

/// Network location of a storage node, parsed from its ring identity `host|port`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeAddr {
    pub host: String,
    pub port: u16,
}

impl FromStr for NodeAddr {
    type Err = RouterError;

    fn from_str(node: &str) -> Result<Self, Self::Err> {
        let invalid = || RouterError::InvalidNodeAddress(node.to_string());
        let (host, port) = node.split_once('|').ok_or_else(invalid)?;
        if host.is_empty() {
            return Err(invalid());
        }
        let port = port.parse().map_err(|_| invalid())?;
        Ok(Self {
            host: host.to_string(),
            port,
        })
    }
}

impl fmt::Display for NodeAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') && !self.host.starts_with('[') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// One request to a storage node.
#[derive(Debug, Clone)]
pub struct ForwardRequest {
    pub node: NodeAddr,
    pub method: Method,
    /// Path on the node, e.g. `/store/{key}/{level}`.
    pub path: String,
    pub body: Bytes,
}

/// What the storage node answered, relayed as-is to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl IntoResponse for NodeResponse {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.body).into_response();
        if let Some(content_type) = self.content_type {
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, content_type);
        }
        response
    }
}
