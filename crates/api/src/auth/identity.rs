//! Identity provider boundary for mobile login.
//!
//! The NIC + OTP check sits behind a trait so the demo implementation and a
//! real national identity gateway are swappable via `AppState` injection
//! instead of hardcoded tokens in source.

use async_trait::async_trait;

use relief_core::error::CoreError;

/// Verified identity attributes returned on a successful OTP check.
#[derive(Debug, Clone)]
pub struct IdentityProfile {
    pub nic: String,
    pub full_name: String,
}

/// Verifies a NIC + OTP pair against an identity service.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn verify_otp(&self, nic: &str, otp: &str) -> Result<IdentityProfile, CoreError>;
}

/// Demo provider: accepts a single fixture OTP injected via configuration.
///
/// NIC format is checked loosely (old 9-digit + letter, or new 12-digit
/// Sri Lankan NIC); the OTP must equal the configured fixture value.
pub struct MockIdentityProvider {
    accepted_otp: String,
}

/// Default fixture OTP for local development.
const DEFAULT_MOCK_OTP: &str = "123456";

impl MockIdentityProvider {
    pub fn new(accepted_otp: impl Into<String>) -> Self {
        Self {
            accepted_otp: accepted_otp.into(),
        }
    }

    /// Load the fixture OTP from `MOCK_IDENTITY_OTP` (default `123456`).
    pub fn from_env() -> Self {
        let accepted_otp =
            std::env::var("MOCK_IDENTITY_OTP").unwrap_or_else(|_| DEFAULT_MOCK_OTP.to_string());
        Self::new(accepted_otp)
    }
}

/// Loose NIC shape check: 9 digits followed by V/X, or 12 digits.
fn nic_is_well_formed(nic: &str) -> bool {
    let bytes = nic.as_bytes();
    match bytes.len() {
        10 => {
            bytes[..9].iter().all(u8::is_ascii_digit)
                && matches!(bytes[9], b'V' | b'v' | b'X' | b'x')
        }
        12 => bytes.iter().all(u8::is_ascii_digit),
        _ => false,
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn verify_otp(&self, nic: &str, otp: &str) -> Result<IdentityProfile, CoreError> {
        if !nic_is_well_formed(nic) {
            return Err(CoreError::Validation(
                "NIC must be 9 digits plus V/X or 12 digits".into(),
            ));
        }
        if otp != self.accepted_otp {
            return Err(CoreError::Unauthorized("Invalid OTP".into()));
        }
        // The demo service has no citizen registry; derive a display name
        // from the NIC's tail.
        let tail = &nic[nic.len().saturating_sub(4)..];
        Ok(IdentityProfile {
            nic: nic.to_string(),
            full_name: format!("Citizen {tail}"),
        })
    }
}
