//! Verification purposes and the keys of their pending records.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Contact channel a pending verification record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationPurpose {
    Email,
    Phone,
}

impl VerificationPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationPurpose::Email => "email",
            VerificationPurpose::Phone => "phone",
        }
    }

    /// Key of the single pending record for `(purpose, user)`
    ///
    /// ```
    /// use th_core::domain::VerificationPurpose;
    /// use uuid::Uuid;
    ///
    /// let user_id = Uuid::nil();
    /// assert_eq!(
    ///     VerificationPurpose::Phone.record_key(user_id),
    ///     "phone_verification_00000000-0000-0000-0000-000000000000"
    /// );
    /// ```
    pub fn record_key(&self, user_id: Uuid) -> String {
        format!("{}_verification_{}", self.as_str(), user_id)
    }
}

impl fmt::Display for VerificationPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
