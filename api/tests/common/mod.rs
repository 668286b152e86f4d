//! Shared harness for the API integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App,
};
use async_trait::async_trait;
use th_api::app::create_app;
use th_api::routes::user::AppState;
use th_core::errors::DomainResult;
use th_core::repositories::InMemoryUserRepository;
use th_core::services::notification::NotificationPort;
use th_core::services::token::{TokenCodec, TokenCodecConfig};
use th_core::services::verification::VerificationServiceConfig;
use th_core::{NotificationMessage, User};
use th_infra::cache::InMemoryEphemeralStore;
use th_shared::config::AppConfig;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Notification port that records every published message
#[derive(Default)]
pub struct CapturingNotifier {
    messages: Mutex<Vec<NotificationMessage>>,
}

impl CapturingNotifier {
    pub fn messages(&self) -> Vec<NotificationMessage> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationPort for CapturingNotifier {
    async fn publish(&self, message: NotificationMessage) -> DomainResult<()> {
        self.messages.lock().unwrap().push(message);
        Ok(())
    }
}

pub struct TestContext {
    pub users: Arc<InMemoryUserRepository>,
    pub store: Arc<InMemoryEphemeralStore>,
    pub notifier: Arc<CapturingNotifier>,
    pub codec: Arc<TokenCodec>,
    pub config: AppConfig,
    pub verification: VerificationServiceConfig,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            store: Arc::new(InMemoryEphemeralStore::new()),
            notifier: Arc::new(CapturingNotifier::default()),
            codec: Arc::new(TokenCodec::new(TokenCodecConfig::new(TEST_SECRET))),
            config: AppConfig::default(),
            verification: VerificationServiceConfig {
                email_verification_url: "https://taskhub.test/api/v1/user/verify-email".to_string(),
                ..Default::default()
            },
        }
    }

    pub fn api_key(&self) -> (&'static str, String) {
        ("x-api-key", self.config.auth.api_key.key.clone())
    }

    /// Insert a user and return a bearer header for them
    pub async fn user(&self, user: User) -> (User, (&'static str, String)) {
        let token = self.codec.issue_session_token(user.id, user.is_admin).unwrap();
        self.users.insert(user.clone()).await;
        (user, ("Authorization", format!("Bearer {}", token)))
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let state = AppState::new(
            Arc::clone(&self.users),
            Arc::clone(&self.store),
            Arc::clone(&self.notifier),
            Arc::clone(&self.codec),
            self.verification.clone(),
        );
        create_app(web::Data::new(state), Arc::clone(&self.codec), &self.config)
    }
}

/// Value of the `token` query parameter of an emailed link
pub fn token_from_link(message: &NotificationMessage) -> String {
    let link = message.payload["link"].as_str().unwrap();
    link.split("token=").nth(1).unwrap().to_string()
}
