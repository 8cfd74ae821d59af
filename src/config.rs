//! Process Configuration
//!
//! Command-line options of the router and storage node processes. Every flag
//! can also be given through the environment.

use clap::Args;
use std::time::Duration;

use crate::ring::DEFAULT_REPLICAS;

/// Router ("counter") settings.
#[derive(Debug, Clone, Args)]
pub struct CounterConfig {
    /// Interface to listen on.
    #[arg(long, env = "COUNTER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "COUNTER_PORT", default_value_t = 8998)]
    pub port: u16,

    /// Virtual keys placed on the ring for each node.
    #[arg(long, env = "COUNTER_REPLICAS", default_value_t = DEFAULT_REPLICAS)]
    pub replicas: usize,

    /// Timeout for a forwarded request to a storage node, in milliseconds.
    #[arg(long, env = "COUNTER_FORWARD_TIMEOUT_MS", default_value_t = 5000)]
    pub forward_timeout_ms: u64,
}

impl CounterConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn forward_timeout(&self) -> Duration {
        Duration::from_millis(self.forward_timeout_ms)
    }
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8998,
            replicas: DEFAULT_REPLICAS,
            forward_timeout_ms: 5000,
        }
    }
}

/// Storage node ("pantry") settings.
#[derive(Debug, Clone, Args)]
pub struct PantryConfig {
    /// Interface to listen on.
    #[arg(long, env = "PANTRY_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "PANTRY_PORT", default_value_t = 8001)]
    pub port: u16,

    /// Tier to bind at startup, as `level=route` (`0` alone binds memory).
    #[arg(long = "tier", value_parser = parse_tier)]
    pub tiers: Vec<TierBinding>,
}

impl PantryConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierBinding {
    pub level: String,
    pub route: String,
}

pub fn parse_tier(value: &str) -> Result<TierBinding, String> {
    let (level, route) = value.split_once('=').unwrap_or((value, ""));
    if level.is_empty() {
        return Err(format!("missing level in {:?}", value));
    }
    if route.is_empty() && level != crate::storage::MEMORY_LEVEL {
        return Err(format!("level {} needs a directory, e.g. {}=/var/pantry", level, level));
    }
    Ok(TierBinding {
        level: level.to_string(),
        route: route.to_string(),
    })
}
