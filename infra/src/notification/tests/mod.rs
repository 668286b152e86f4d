use std::sync::Arc;

use serde_json::json;
use th_core::services::notification::NotificationPort;
use th_core::NotificationMessage;
use th_shared::config::notification::{NotificationConfig, NotificationProvider};

use crate::cache::{CacheConfig, RedisClient};
use crate::notification::{create_notification_port, LoggingNotificationQueue, RedisStreamQueue};

#[tokio::test]
async fn test_log_queue_accepts_messages() {
    let queue = LoggingNotificationQueue::new();
    let message = NotificationMessage::sms(
        "+2348012345678",
        "phone_verification",
        json!({ "message": "code 123456" }),
    );

    assert!(queue.publish(message).await.is_ok());
}

#[tokio::test]
async fn test_factory_builds_log_queue() {
    let config = NotificationConfig {
        provider: NotificationProvider::Log,
        ..Default::default()
    };

    let port: Arc<dyn NotificationPort> = create_notification_port(&config).await.unwrap();
    let message = NotificationMessage::email("a@b.test", "Hi", "confirm_email", json!({}));
    assert!(port.publish(message).await.is_ok());
}

#[tokio::test]
async fn test_factory_rejects_invalid_queue_url() {
    let config = NotificationConfig {
        provider: NotificationProvider::Redis,
        queue_url: "not-a-url".to_string(),
        ..Default::default()
    };

    assert!(create_notification_port(&config).await.is_err());
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn test_redis_stream_appends_entry() {
    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
    let client = RedisClient::new(CacheConfig::new(url)).await.unwrap();
    let queue = RedisStreamQueue::new(client.clone(), "taskhub-test:notifications");

    let mut conn = client.connection();
    let before: usize = redis::cmd("XLEN")
        .arg(queue.stream_key())
        .query_async(&mut conn)
        .await
        .unwrap();

    let message = NotificationMessage::email(
        "ada@taskhub.test",
        "Verify Your Email Address",
        "confirm_email",
        json!({ "link": "https://taskhub.test/verify?token=abc", "name": "ada" }),
    );
    queue.publish(message).await.unwrap();

    let after: usize = redis::cmd("XLEN")
        .arg(queue.stream_key())
        .query_async(&mut conn)
        .await
        .unwrap();
    assert_eq!(after, before + 1);
}
