//! Translation-key lookup with English fallback.

use crate::types::Language;

/// Message keys used by the core.
pub mod keys {
    /// Onboarding greeting.
    pub const WELCOME: &str = "welcome";
    /// Phone number prompt.
    pub const ENTER_PHONE: &str = "enterPhone";
    /// Wrong one-time code.
    pub const INVALID_OTP: &str = "invalidOtp";
    /// Listing creation failed.
    pub const POST_FAILED: &str = "postFailed";
    /// Empty query result.
    pub const NO_RESULTS: &str = "noResults";
    /// Description generation needs more input.
    pub const DESCRIBE_NEEDS_INPUT: &str = "describeNeedsInput";
    /// Button that requests a code.
    pub const SEND_OTP: &str = "sendOtp";
    /// Code entry prompt.
    pub const ENTER_OTP: &str = "enterOtp";
    /// Button that checks the code.
    pub const VERIFY: &str = "verify";
    /// Request another code.
    pub const RESEND: &str = "resend";
    /// Return to phone entry.
    pub const BACK: &str = "back";
    /// Tenant role card.
    pub const TENANT_ROLE: &str = "tenantRole";
    /// Landlord role card.
    pub const LANDLORD_ROLE: &str = "landlordRole";
    /// Header button returning to role selection.
    pub const SWITCH_ROLE: &str = "switchRole";
    /// Reset every search filter.
    pub const CLEAR_FILTERS: &str = "clearFilters";
    /// Safety banner above the listings.
    pub const SAFE_RENTING: &str = "safeRenting";

    /// Every key the flow shows to users.
    pub const ALL: [&str; 16] = [
        WELCOME,
        ENTER_PHONE,
        INVALID_OTP,
        POST_FAILED,
        NO_RESULTS,
        DESCRIBE_NEEDS_INPUT,
        SEND_OTP,
        ENTER_OTP,
        VERIFY,
        RESEND,
        BACK,
        TENANT_ROLE,
        LANDLORD_ROLE,
        SWITCH_ROLE,
        CLEAR_FILTERS,
        SAFE_RENTING,
    ];
}

fn english(key: &str) -> Option<&'static str> {
    Some(match key {
        keys::WELCOME => "Welcome to BackRoom",
        keys::ENTER_PHONE => "Enter your phone number to get started",
        keys::INVALID_OTP => "Invalid code. Please try again.",
        keys::POST_FAILED => "Failed to post listing. Please try again.",
        keys::NO_RESULTS => "No rooms match your search.",
        keys::DESCRIBE_NEEDS_INPUT => "Please enter a Residence Name and Price first.",
        keys::SEND_OTP => "Send OTP",
        keys::ENTER_OTP => "Enter the code sent to your phone",
        keys::VERIFY => "Verify",
        keys::RESEND => "Resend code",
        keys::BACK => "Back",
        keys::TENANT_ROLE => "I need a room",
        keys::LANDLORD_ROLE => "I have a room to rent",
        keys::SWITCH_ROLE => "Switch role",
        keys::CLEAR_FILTERS => "Clear filters",
        keys::SAFE_RENTING => "Never pay a deposit before viewing the room.",
        _ => return None,
    })
}

fn zulu(key: &str) -> Option<&'static str> {
    Some(match key {
        keys::WELCOME => "Siyakwamukela ku-BackRoom",
        keys::ENTER_PHONE => "Faka inombolo yakho yocingo ukuze uqale",
        keys::INVALID_OTP => "Ikhodi engalungile. Sicela uzame futhi.",
        keys::SEND_OTP => "Thumela i-OTP",
        keys::VERIFY => "Qinisekisa",
        keys::BACK => "Emuva",
        _ => return None,
    })
}

fn xhosa(key: &str) -> Option<&'static str> {
    Some(match key {
        keys::WELCOME => "Wamkelekile ku-BackRoom",
        keys::INVALID_OTP => "Ikhowudi ayichanekanga. Nceda uzame kwakhona.",
        keys::VERIFY => "Qinisekisa",
        keys::BACK => "Buyela umva",
        _ => return None,
    })
}

fn sotho(key: &str) -> Option<&'static str> {
    Some(match key {
        keys::WELCOME => "Rea o amohela ho BackRoom",
        _ => return None,
    })
}

fn untranslated(_: &str) -> Option<&'static str> {
    None
}

fn table(lang: Language) -> fn(&str) -> Option<&'static str> {
    match lang {
        Language::En => english,
        Language::Zu => zulu,
        Language::Xh => xhosa,
        Language::St => sotho,
        _ => untranslated,
    }
}

/// Message for `key` in `lang`, else in English, else the key itself.
pub fn translate<'k>(lang: Language, key: &'k str) -> &'k str {
    table(lang)(key).or_else(|| english(key)).unwrap_or(key)
}
