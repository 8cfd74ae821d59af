use std::future::Future;
use std::time::Duration;

use super::types::{ForwardRequest, NodeResponse, RouterError};

/// Sends a request to a storage node and returns its answer.
///
/// Any status the node produces, including errors, is a successful forward.
/// `Err` is reserved for failing to reach the node or read its reply.
pub trait Forwarder: Send + Sync + 'static {
    fn forward(
        &self,
        request: ForwardRequest,
    ) -> impl Future<Output = Result<NodeResponse, RouterError>> + Send;
}

/// Plain HTTP forwarding. One attempt per request, bounded by `timeout`.
#[derive(Clone)]
pub struct HttpForwarder {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpForwarder {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }
}

impl Forwarder for HttpForwarder {
    async fn forward(&self, request: ForwardRequest) -> Result<NodeResponse, RouterError> {
        let node = request.node.to_string();
        let transport = |e: reqwest::Error| RouterError::Transport {
            node: node.clone(),
            reason: e.to_string(),
        };

        let url = format!("http://{}{}", request.node, request.path);
        let response = self
            .client
            .request(request.method, url)
            .body(request.body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .cloned();
        let body = response.bytes().await.map_err(transport)?;

        Ok(NodeResponse {
            status,
            content_type,
            body,
        })
    }
}
