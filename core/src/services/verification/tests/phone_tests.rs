//! Unit tests for the phone verification workflow

use std::time::Duration;

use uuid::Uuid;

use crate::domain::entities::notification::{NotificationChannel, PHONE_VERIFICATION_TEMPLATE};
use crate::domain::entities::user::User;
use crate::domain::entities::verification::VerificationPurpose;
use crate::errors::{DomainError, VerificationError};
use crate::repositories::UserRepository;
use crate::services::verification::{generate_otp, VerificationServiceConfig};

use super::mocks::{test_config, Harness};

async fn seed_user(harness: &Harness) -> User {
    let user = User::new("ada", "ada@example.com").with_phone("08031234567");
    harness.users.insert(user.clone()).await;
    user
}

fn phone_key(user: &User) -> String {
    VerificationPurpose::Phone.record_key(user.id)
}

async fn is_phone_verified(harness: &Harness, user_id: Uuid) -> bool {
    harness.users.find_by_id(user_id).await.unwrap().unwrap().is_phone_verified
}

#[test]
fn test_generate_otp_has_exact_length() {
    for length in 4..=6 {
        for _ in 0..50 {
            let code = generate_otp(length);
            assert_eq!(code.len(), length);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }
}

#[tokio::test]
async fn test_send_code_stores_and_texts_code() {
    let harness = Harness::new();
    let user = seed_user(&harness).await;
    let service = harness.phone_service(test_config());

    let code = service.send_verification_code(user.id).await.unwrap().expect("code outside production");

    assert_eq!(code.len(), 6);
    assert_eq!(harness.store.value(&phone_key(&user)), Some(code.clone()));

    let messages = harness.notifier.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].channel, NotificationChannel::Sms);
    assert_eq!(messages[0].recipient, "+2348031234567");
    assert_eq!(messages[0].template, PHONE_VERIFICATION_TEMPLATE);
    assert_eq!(
        messages[0].payload["message"],
        format!("Please, confirm your registered phone number on TaskHub with this code {}", code)
    );
}

#[tokio::test]
async fn test_send_code_hides_code_in_production() {
    let harness = Harness::new();
    let user = seed_user(&harness).await;
    let config = VerificationServiceConfig { expose_otp: false, ..test_config() };
    let service = harness.phone_service(config);

    assert_eq!(service.send_verification_code(user.id).await.unwrap(), None);
    assert!(harness.store.value(&phone_key(&user)).is_some());
}

#[tokio::test]
async fn test_send_code_honours_configured_length() {
    let harness = Harness::new();
    let user = seed_user(&harness).await;
    let config = VerificationServiceConfig { otp_length: 4, ..test_config() };
    let service = harness.phone_service(config);

    let code = service.send_verification_code(user.id).await.unwrap().unwrap();
    assert_eq!(code.len(), 4);
}

#[tokio::test]
async fn test_verify_phone_success() {
    let harness = Harness::new();
    let user = seed_user(&harness).await;
    let service = harness.phone_service(test_config());

    let code = service.send_verification_code(user.id).await.unwrap().unwrap();
    service.verify_phone(user.id, &code).await.unwrap();

    assert!(is_phone_verified(&harness, user.id).await);
    assert_eq!(harness.store.value(&phone_key(&user)), None);
}

#[tokio::test]
async fn test_wrong_code_is_code_mismatch() {
    let harness = Harness::new();
    let user = seed_user(&harness).await;
    let service = harness.phone_service(test_config());
    harness.store.seed(&phone_key(&user), "1234", 300);

    assert_eq!(
        service.verify_phone(user.id, "0000").await,
        Err(DomainError::Verification(VerificationError::CodeMismatch))
    );
    assert!(!is_phone_verified(&harness, user.id).await);
    assert_eq!(harness.store.value(&phone_key(&user)).as_deref(), Some("1234"));
}

#[tokio::test(start_paused = true)]
async fn test_code_expires_after_ttl() {
    let harness = Harness::new();
    let user = seed_user(&harness).await;
    let service = harness.phone_service(test_config());

    let code = service.send_verification_code(user.id).await.unwrap().unwrap();
    tokio::time::advance(Duration::from_secs(301)).await;

    assert_eq!(
        service.verify_phone(user.id, &code).await,
        Err(DomainError::Verification(VerificationError::ExpiredOrMissing))
    );
    assert!(!is_phone_verified(&harness, user.id).await);
}

#[tokio::test]
async fn test_reinitiation_supersedes_previous_code() {
    let harness = Harness::new();
    let user = seed_user(&harness).await;
    let service = harness.phone_service(test_config());

    let first = service.send_verification_code(user.id).await.unwrap().unwrap();
    let mut second = service.send_verification_code(user.id).await.unwrap().unwrap();
    while second == first {
        second = service.send_verification_code(user.id).await.unwrap().unwrap();
    }

    assert_eq!(
        service.verify_phone(user.id, &first).await,
        Err(DomainError::Verification(VerificationError::CodeMismatch))
    );
    assert!(service.verify_phone(user.id, &second).await.is_ok());
}

#[tokio::test]
async fn test_verify_phone_is_single_use() {
    let harness = Harness::new();
    let user = seed_user(&harness).await;
    let service = harness.phone_service(test_config());

    let code = service.send_verification_code(user.id).await.unwrap().unwrap();
    service.verify_phone(user.id, &code).await.unwrap();

    assert_eq!(
        service.verify_phone(user.id, &code).await,
        Err(DomainError::Verification(VerificationError::phone_already_verified()))
    );

    harness.users.reset_verification(user.id).await;
    assert_eq!(
        service.verify_phone(user.id, &code).await,
        Err(DomainError::Verification(VerificationError::ExpiredOrMissing))
    );
}

#[tokio::test]
async fn test_already_verified_phone_is_left_untouched() {
    let harness = Harness::new();
    let mut user = User::new("ada", "ada@example.com").with_phone("08031234567");
    user.is_phone_verified = true;
    harness.users.insert(user.clone()).await;
    let service = harness.phone_service(test_config());

    assert_eq!(
        service.send_verification_code(user.id).await,
        Err(DomainError::Verification(VerificationError::phone_already_verified()))
    );
    assert_eq!(
        service.verify_phone(user.id, "123456").await,
        Err(DomainError::Verification(VerificationError::phone_already_verified()))
    );
    assert_eq!(harness.store.record_count(), 0);
    assert!(harness.notifier.messages().is_empty());
}

#[tokio::test]
async fn test_unknown_user() {
    let harness = Harness::new();
    let service = harness.phone_service(test_config());

    assert_eq!(
        service.send_verification_code(Uuid::new_v4()).await,
        Err(DomainError::Verification(VerificationError::UserNotFound))
    );
}

#[tokio::test]
async fn test_user_without_phone_is_validation_error() {
    let harness = Harness::new();
    let user = User::new("ada", "ada@example.com");
    harness.users.insert(user.clone()).await;
    let service = harness.phone_service(test_config());

    let result = service.send_verification_code(user.id).await;

    assert!(matches!(result, Err(DomainError::Validation { .. })));
    assert_eq!(harness.store.record_count(), 0);
}

#[tokio::test]
async fn test_unusable_phone_numbers_are_rejected_before_storing() {
    let harness = Harness::new();
    let service = harness.phone_service(test_config());

    for phone in ["", "  ", "+", "(---)", "0"] {
        let user = User::new("ada", "ada@example.com").with_phone(phone);
        harness.users.insert(user.clone()).await;

        let result = service.send_verification_code(user.id).await;

        assert!(matches!(result, Err(DomainError::Validation { .. })), "accepted {:?}", phone);
    }
    assert_eq!(harness.store.record_count(), 0);
    assert!(harness.notifier.messages().is_empty());
}
