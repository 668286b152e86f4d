//! Integration tests running both workflows through the notification dispatcher

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::RwLock;

    use th_core::domain::{NotificationChannel, NotificationMessage, User, VerificationPurpose};
    use th_core::errors::DomainResult;
    use th_core::repositories::{InMemoryUserRepository, UserRepository};
    use th_core::services::token::{TokenCodec, TokenCodecConfig};
    use th_core::services::verification::{
        EmailVerificationService, EphemeralStore, PhoneVerificationService,
        VerificationServiceConfig,
    };
    use th_core::services::notification::{NotificationDispatcher, NotificationPort};

    // Store without expiry; TTLs are covered by the unit tests
    #[derive(Default)]
    struct MapStore {
        entries: RwLock<HashMap<String, String>>,
    }

    #[async_trait]
    impl EphemeralStore for MapStore {
        async fn put(&self, key: &str, value: &str, _ttl_seconds: u64) -> DomainResult<()> {
            self.entries.write().await.insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn get(&self, key: &str) -> DomainResult<Option<String>> {
            Ok(self.entries.read().await.get(key).cloned())
        }

        async fn delete(&self, key: &str) -> DomainResult<()> {
            self.entries.write().await.remove(key);
            Ok(())
        }
    }

    // Downstream queue capturing wire bodies
    #[derive(Default)]
    struct CapturingQueue {
        bodies: Mutex<Vec<(NotificationChannel, String)>>,
    }

    #[async_trait]
    impl NotificationPort for CapturingQueue {
        async fn publish(&self, message: NotificationMessage) -> DomainResult<()> {
            let body = message.to_wire_json().unwrap();
            self.bodies.lock().unwrap().push((message.channel, body));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_email_and_phone_verification_through_dispatcher() {
        let users = Arc::new(InMemoryUserRepository::new());
        let store = Arc::new(MapStore::default());
        let queue = Arc::new(CapturingQueue::default());
        let codec = Arc::new(TokenCodec::new(TokenCodecConfig::new("integration-secret")));
        let (dispatcher, worker) =
            NotificationDispatcher::spawn(queue.clone(), 16, Duration::from_secs(1));
        let dispatcher = Arc::new(dispatcher);

        let user = User::new("grace", "grace@example.com").with_phone("+14155552671");
        users.insert(user.clone()).await;

        let email = EmailVerificationService::new(
            users.clone(),
            store.clone(),
            dispatcher.clone(),
            codec.clone(),
            VerificationServiceConfig::default(),
        );
        let phone = PhoneVerificationService::new(
            users.clone(),
            store.clone(),
            dispatcher.clone(),
            VerificationServiceConfig::default(),
        );

        email.send_verification_link(user.id).await.unwrap();
        let token = store
            .get(&VerificationPurpose::Email.record_key(user.id))
            .await
            .unwrap()
            .unwrap();
        let verified = email.verify_email(&token).await.unwrap();
        assert_eq!(verified.id, user.id);

        let code = phone.send_verification_code(user.id).await.unwrap().unwrap();
        phone.verify_phone(user.id, &code).await.unwrap();

        let stored = users.find_by_id(user.id).await.unwrap().unwrap();
        assert!(stored.is_email_verified);
        assert!(stored.is_phone_verified);

        drop(email);
        drop(phone);
        drop(dispatcher);
        worker.await.unwrap();

        let bodies = queue.bodies.lock().unwrap().clone();
        let channels: Vec<_> = bodies.iter().map(|(channel, _)| *channel).collect();
        assert_eq!(
            channels,
            vec![NotificationChannel::Email, NotificationChannel::Email, NotificationChannel::Sms]
        );

        let sms: serde_json::Value = serde_json::from_str(&bodies[2].1).unwrap();
        assert_eq!(sms["notifyBy"], serde_json::json!(["sms"]));
        assert_eq!(sms["phone"], "+14155552671");
        assert!(sms["data"]["message"].as_str().unwrap().ends_with(&code));
    }
}
