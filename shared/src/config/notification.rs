//! Notification queue configuration

use serde::{Deserialize, Serialize};

/// Which notification publisher to wire up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationProvider {
    /// Append to a Redis stream consumed by the delivery workers
    Redis,
    /// Log messages instead of publishing them (development)
    Log,
}

impl std::str::FromStr for NotificationProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "redis" => Ok(NotificationProvider::Redis),
            "log" | "mock" => Ok(NotificationProvider::Log),
            _ => Err(format!("Invalid notification provider: {}", s)),
        }
    }
}

/// Notification dispatch configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationConfig {
    /// Publisher implementation
    pub provider: NotificationProvider,

    /// Address of the delivery queue
    pub queue_url: String,

    /// Stream (queue) name messages are appended to
    pub queue_name: String,

    /// Capacity of the in-process dispatch channel
    pub channel_capacity: usize,

    /// Upper bound for a single publish call in milliseconds
    pub publish_timeout_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            provider: NotificationProvider::Log,
            queue_url: String::from("redis://localhost:6379"),
            queue_name: String::from("taskhub:notifications"),
            channel_capacity: 1024,
            publish_timeout_ms: 5000,
        }
    }
}

impl NotificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let provider = std::env::var("NOTIFICATION_PROVIDER")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.provider);
        let queue_url = std::env::var("NOTIFICATION_QUEUE_URL").unwrap_or(defaults.queue_url);
        let queue_name = std::env::var("NOTIFICATION_QUEUE_NAME").unwrap_or(defaults.queue_name);
        let channel_capacity = std::env::var("NOTIFICATION_CHANNEL_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|c: &usize| *c > 0)
            .unwrap_or(defaults.channel_capacity);
        let publish_timeout_ms = std::env::var("NOTIFICATION_PUBLISH_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.publish_timeout_ms);

        Self {
            provider,
            queue_url,
            queue_name,
            channel_capacity,
            publish_timeout_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str() {
        assert_eq!("redis".parse::<NotificationProvider>().unwrap(), NotificationProvider::Redis);
        assert_eq!("mock".parse::<NotificationProvider>().unwrap(), NotificationProvider::Log);
        assert!("sqs".parse::<NotificationProvider>().is_err());
    }
}
