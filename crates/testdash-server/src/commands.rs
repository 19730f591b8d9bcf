//! Command execution.

use crate::cli::{Commands, InvalidateTarget};
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;
use testdash_cache::CacheManager;
use testdash_core::{DashError, DashResult};
use tracing::info;

/// Result of one command, printable as text or JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandOutput {
    pub message: String,
    pub data: Value,
}

impl CommandOutput {
    fn new(message: impl Into<String>, data: Value) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

impl fmt::Display for CommandOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Runs a command against the cache.
///
/// Store failures are already absorbed by the manager; the only command that
/// fails on an unreachable store is `ping`.
pub async fn execute(command: &Commands, cache: &CacheManager) -> DashResult<CommandOutput> {
    match command {
        Commands::Ping => {
            if !cache.health_check().await {
                return Err(DashError::cache_unavailable(format!(
                    "{} store did not answer",
                    cache.backend_name()
                )));
            }
            Ok(CommandOutput::new(
                format!("{} store is reachable", cache.backend_name()),
                json!({ "backend": cache.backend_name(), "reachable": true }),
            ))
        }
        Commands::Get { key } => {
            let value = cache.get::<Value>(key).await;
            let message = match &value {
                Some(value) => serde_json::to_string_pretty(value)
                    .map_err(|e| DashError::serialization(e.to_string()))?,
                None => format!("{key}: not cached"),
            };
            Ok(CommandOutput::new(message, json!({ "key": key, "value": value })))
        }
        Commands::Invalidate(target) => {
            let removed = invalidate(*target, cache).await;
            info!(?target, removed, "Invalidation finished");
            Ok(CommandOutput::new(
                format!("Removed {removed} key(s)"),
                json!({ "removed": removed }),
            ))
        }
        Commands::DeletePattern { pattern } => {
            let removed = cache.delete_pattern(pattern).await;
            Ok(CommandOutput::new(
                format!("Removed {removed} key(s) matching {pattern}"),
                json!({ "pattern": pattern, "removed": removed }),
            ))
        }
    }
}

async fn invalidate(target: InvalidateTarget, cache: &CacheManager) -> u64 {
    match target {
        InvalidateTarget::Suite { id } => cache.invalidate_suite(id).await,
        InvalidateTarget::Case { id, suite_id } => cache.invalidate_case(id, suite_id).await,
        InvalidateTarget::Execution { id } => cache.invalidate_execution(id).await,
        InvalidateTarget::Dashboard => cache.invalidate_dashboard().await,
        InvalidateTarget::All => cache.invalidate_all().await,
    }
}
