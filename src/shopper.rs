//! Shopper
//!
//! Minimal client for poking at a router or storage node by hand:
//!
//! ```text
//! document-pantry shopper --verb PUT --port 8998 --uri /add/my-key/0 --data 'The bare necessities'
//! ```

use anyhow::Result;
use clap::{Args, ValueEnum};
use reqwest::Method;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "UPPER")]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl From<Verb> for Method {
    fn from(verb: Verb) -> Self {
        match verb {
            Verb::Get => Method::GET,
            Verb::Post => Method::POST,
            Verb::Put => Method::PUT,
            Verb::Delete => Method::DELETE,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ShopperArgs {
    /// HTTP verb.
    #[arg(long, value_enum, default_value = "GET")]
    pub verb: Verb,

    /// Service host.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Service port.
    #[arg(long, default_value_t = 8998)]
    pub port: u16,

    /// Request path, e.g. `/node/127.0.0.1%7C8001`.
    #[arg(long)]
    pub uri: String,

    /// Request body.
    #[arg(long = "data")]
    pub payload: Option<String>,
}

/// Sends the request and renders the answer as `"{status} {reason} {body}"`.
///
/// The body is appended as received, so binary documents come back intact.
pub async fn run(args: &ShopperArgs) -> Result<Vec<u8>> {
    let url = format!("http://{}:{}{}", args.host, args.port, args.uri);
    tracing::debug!("{:?} {}", args.verb, url);

    let mut request = reqwest::Client::new().request(args.verb.into(), url);
    if let Some(payload) = &args.payload {
        request = request.body(payload.clone());
    }

    let response = request.send().await?;
    let status = response.status();
    let body = response.bytes().await?;

    let mut line = format!(
        "{} {} ",
        status.as_u16(),
        status.canonical_reason().unwrap_or("")
    )
    .into_bytes();
    line.extend_from_slice(&body);
    Ok(line)
}
