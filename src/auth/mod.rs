//! Phone-number one-time-code verification.
//!
//! [`StubOtp`] never delivers anything: it waits, logs the configured code and
//! later compares against it. A real SMS gateway implements [`OtpGateway`]
//! and slots in without changing callers.

/// Onboarding flow driven by an [`OtpGateway`].
pub mod onboarding;

use std::future::Future;

use crate::runtime::latency::Latency;

/// Code accepted by the stub unless configured otherwise.
pub const DEFAULT_OTP_CODE: &str = "1234";

/// Shortest phone number (in characters) accepted for OTP delivery.
pub const MIN_PHONE_LEN: usize = 10;

/// Failure talking to an OTP gateway.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Gateway refused or could not deliver.
    #[error("otp gateway: {0}")]
    Gateway(String),
}

/// Sends and checks one-time codes.
pub trait OtpGateway: Send + Sync {
    /// Delivers a code to `phone`.
    fn send_otp(&self, phone: &str) -> impl Future<Output = Result<(), AuthError>> + Send;

    /// True when `code` is the one sent to `phone`.
    fn verify_otp(
        &self,
        phone: &str,
        code: &str,
    ) -> impl Future<Output = Result<bool, AuthError>> + Send;
}

/// True when `phone` is long enough to send a code to.
pub fn is_valid_phone(phone: &str, min_len: usize) -> bool {
    phone.chars().count() >= min_len
}

/// Fixed-code gateway with artificial latency.
#[derive(Debug, Clone)]
pub struct StubOtp {
    code: String,
    latency: Latency,
}

impl Default for StubOtp {
    fn default() -> Self {
        Self::new(DEFAULT_OTP_CODE, Latency::from_millis(1000))
    }
}

impl StubOtp {
    /// Gateway accepting `code` after waiting `latency` per call.
    pub fn new(code: impl Into<String>, latency: Latency) -> Self {
        Self {
            code: code.into(),
            latency,
        }
    }

    /// The code every verification is compared against.
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl OtpGateway for StubOtp {
    async fn send_otp(&self, phone: &str) -> Result<(), AuthError> {
        self.latency.elapse().await;
        tracing::info!(phone, code = %self.code, "otp sent");
        Ok(())
    }

    async fn verify_otp(&self, phone: &str, code: &str) -> Result<bool, AuthError> {
        self.latency.elapse().await;
        let accepted = code == self.code;
        tracing::debug!(phone, accepted, "otp checked");
        Ok(accepted)
    }
}
