use serde::{Deserialize, Serialize};

use crate::{
    i18n::{self, keys},
    types::{Language, ViewRole},
};

use super::{AuthError, MIN_PHONE_LEN, OtpGateway, is_valid_phone};

/// Screens of the onboarding flow, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    /// Waiting for a phone number.
    PhoneInput,
    /// Code sent; waiting for the user to type it.
    OtpVerify,
    /// Verified; picking an interface language.
    LanguageSelect,
    /// Picking tenant or landlord.
    RoleSelect,
    /// Inside the marketplace.
    MainApp,
}

/// A step that could not be taken.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OnboardingError {
    /// Step not valid on the current screen.
    #[error("{action} is not allowed during {stage:?}")]
    WrongStage {
        /// Current screen.
        stage: Stage,
        /// Attempted step.
        action: &'static str,
    },
    /// Phone number shorter than the minimum.
    #[error("phone number must have at least {min} characters")]
    PhoneTooShort {
        /// Required length.
        min: usize,
    },
    /// Only tenant or landlord can be chosen.
    #[error("role {0:?} cannot be chosen")]
    InvalidRole(ViewRole),
    /// The OTP gateway failed.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// In-memory onboarding session; restarts from [`Stage::PhoneInput`] every run.
#[derive(Debug, Clone)]
pub struct Onboarding {
    stage: Stage,
    phone: String,
    verified: bool,
    language: Language,
    role: ViewRole,
    otp_error: Option<String>,
    min_phone_len: usize,
}

impl Default for Onboarding {
    fn default() -> Self {
        Self::new(MIN_PHONE_LEN)
    }
}

impl Onboarding {
    /// Fresh session requiring phone numbers of at least `min_phone_len` characters.
    pub fn new(min_phone_len: usize) -> Self {
        Self {
            stage: Stage::PhoneInput,
            phone: String::new(),
            verified: false,
            language: Language::default(),
            role: ViewRole::default(),
            otp_error: None,
            min_phone_len,
        }
    }

    /// Current screen.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Phone number submitted so far.
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// True once a correct code was entered.
    pub fn is_verified(&self) -> bool {
        self.verified
    }

    /// Interface language.
    pub fn language(&self) -> Language {
        self.language
    }

    /// Current marketplace role.
    pub fn role(&self) -> ViewRole {
        self.role
    }

    /// Translated message left by the last wrong code.
    pub fn otp_error(&self) -> Option<&str> {
        self.otp_error.as_deref()
    }

    /// Sends a code to `phone` and moves to [`Stage::OtpVerify`].
    pub async fn submit_phone<G: OtpGateway>(
        &mut self,
        gateway: &G,
        phone: &str,
    ) -> Result<Stage, OnboardingError> {
        self.expect_stage(Stage::PhoneInput, "submit_phone")?;
        if !is_valid_phone(phone, self.min_phone_len) {
            return Err(OnboardingError::PhoneTooShort {
                min: self.min_phone_len,
            });
        }

        gateway.send_otp(phone).await?;
        self.phone = phone.to_string();
        self.otp_error = None;
        self.stage = Stage::OtpVerify;
        Ok(self.stage)
    }

    /// Checks `code`; a wrong code keeps the screen and records a message.
    pub async fn submit_otp<G: OtpGateway>(
        &mut self,
        gateway: &G,
        code: &str,
    ) -> Result<Stage, OnboardingError> {
        self.expect_stage(Stage::OtpVerify, "submit_otp")?;
        if gateway.verify_otp(&self.phone, code).await? {
            self.verified = true;
            self.otp_error = None;
            self.stage = Stage::LanguageSelect;
        } else {
            tracing::debug!(phone = %self.phone, "wrong otp entered");
            self.otp_error = Some(i18n::translate(self.language, keys::INVALID_OTP).to_string());
        }
        Ok(self.stage)
    }

    /// Returns from the code screen to phone entry.
    pub fn back(&mut self) -> Result<Stage, OnboardingError> {
        self.expect_stage(Stage::OtpVerify, "back")?;
        self.otp_error = None;
        self.stage = Stage::PhoneInput;
        Ok(self.stage)
    }

    /// Sets the interface language.
    pub fn choose_language(&mut self, language: Language) -> Result<Stage, OnboardingError> {
        self.expect_stage(Stage::LanguageSelect, "choose_language")?;
        self.language = language;
        self.stage = Stage::RoleSelect;
        Ok(self.stage)
    }

    /// Enters the marketplace as tenant or landlord.
    pub fn choose_role(&mut self, role: ViewRole) -> Result<Stage, OnboardingError> {
        self.expect_stage(Stage::RoleSelect, "choose_role")?;
        if role == ViewRole::Home {
            return Err(OnboardingError::InvalidRole(role));
        }
        self.role = role;
        self.stage = Stage::MainApp;
        Ok(self.stage)
    }

    /// Leaves the marketplace for role selection, keeping the current role.
    pub fn switch_role(&mut self) -> Result<Stage, OnboardingError> {
        self.expect_stage(Stage::MainApp, "switch_role")?;
        self.stage = Stage::RoleSelect;
        Ok(self.stage)
    }

    /// Backs out of the landlord dashboard: role resets to `Home` and the
    /// flow returns to role selection.
    pub fn leave_dashboard(&mut self) -> Result<Stage, OnboardingError> {
        self.expect_stage(Stage::MainApp, "leave_dashboard")?;
        if self.role != ViewRole::Landlord {
            return Err(OnboardingError::WrongStage {
                stage: self.stage,
                action: "leave_dashboard",
            });
        }
        self.role = ViewRole::Home;
        self.stage = Stage::RoleSelect;
        Ok(self.stage)
    }

    /// After a landlord posts a room, go back to role selection.
    pub fn listing_posted(&mut self) -> Result<Stage, OnboardingError> {
        self.expect_stage(Stage::MainApp, "listing_posted")?;
        self.role = ViewRole::Home;
        self.stage = Stage::RoleSelect;
        Ok(self.stage)
    }

    fn expect_stage(&self, stage: Stage, action: &'static str) -> Result<(), OnboardingError> {
        if self.stage == stage {
            Ok(())
        } else {
            Err(OnboardingError::WrongStage {
                stage: self.stage,
                action,
            })
        }
    }
}
