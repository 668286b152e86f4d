//! Types for verification workflow results

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The user whose email address was just verified
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedEmail {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
}
