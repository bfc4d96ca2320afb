//! Listing description generation with a fixed fallback.

use std::future::Future;

use crate::{
    listing::{Address, Amenities},
    types::Rand,
};

/// Substituted when the generator fails.
pub const FALLBACK_DESCRIPTION: &str = "Great room available. Contact landlord for details.";

/// Substituted when the generator succeeds with empty text.
pub const EMPTY_DESCRIPTION: &str = "Spacious and secure room available.";

/// Word budget given to generators.
pub const MAX_WORDS: usize = 60;

/// The partial listing a description is written from.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptionRequest {
    /// Residence name.
    pub title: String,
    /// Location.
    pub address: Address,
    /// Monthly rent.
    pub price: Rand,
    /// Amenity terms.
    pub amenities: Amenities,
}

/// Why no description was produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescribeError {
    /// Title or price missing; the caller should ask for them first.
    #[error("a residence name and price are required")]
    MissingInput,
    /// Generator backend failed.
    #[error("description backend: {0}")]
    Backend(String),
}

impl DescriptionRequest {
    /// Requires a title and a non-zero price.
    pub fn check(&self) -> Result<(), DescribeError> {
        if self.title.trim().is_empty() || self.price == 0 {
            return Err(DescribeError::MissingInput);
        }
        Ok(())
    }

    /// Prompt text for a language-model backend.
    pub fn prompt(&self) -> String {
        format!(
            "Write a short, catchy, and professional rental listing description for a room in a \
             South African township context (e.g. BackRoom).\n\n\
             Details:\n\
             - Name: {}\n\
             - Location: {}, {}\n\
             - Rent: R{}\n\
             - Wifi: {}\n\
             - Electricity: {}\n\
             - Water: {}\n\n\
             Keep it under {MAX_WORDS} words. Emphasize safety and convenience. Use a welcoming tone.",
            self.title,
            self.address.suburb,
            self.address.city,
            self.price,
            self.amenities.wifi.label(),
            self.amenities.electricity.label(),
            self.amenities.water.label(),
        )
    }
}

/// Writes a short free-text description for a listing.
pub trait DescriptionGenerator: Send + Sync {
    /// Produces a description for `request`.
    fn generate(
        &self,
        request: &DescriptionRequest,
    ) -> impl Future<Output = Result<String, DescribeError>> + Send;
}

/// Offline generator that fills a template from the request fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateDescriber;

impl DescriptionGenerator for TemplateDescriber {
    async fn generate(&self, request: &DescriptionRequest) -> Result<String, DescribeError> {
        let a = &request.amenities;
        let mut included = Vec::new();
        for (name, status) in [
            ("wifi", a.wifi),
            ("water", a.water),
            ("electricity", a.electricity),
        ] {
            if status == crate::types::AmenityStatus::Free {
                included.push(name);
            }
        }

        let mut text = format!(
            "{} in {}, {} for R{} a month.",
            request.title.trim(),
            request.address.suburb,
            request.address.city,
            request.price
        );
        if !included.is_empty() {
            text.push_str(&format!(" Includes {}.", included.join(" and ")));
        }
        text.push_str(" Safe, convenient and close to transport. Welcome home!");
        Ok(truncate_words(&text, MAX_WORDS))
    }
}

/// Runs `generator`, substituting the fixed fallbacks on failure or empty output.
///
/// Missing input is returned to the caller instead of being papered over.
pub async fn describe_or_fallback<G: DescriptionGenerator>(
    generator: &G,
    request: &DescriptionRequest,
) -> Result<String, DescribeError> {
    request.check()?;
    match generator.generate(request).await {
        Ok(text) if text.trim().is_empty() => Ok(EMPTY_DESCRIPTION.to_string()),
        Ok(text) => Ok(text),
        Err(err) => {
            tracing::warn!(error = %err, "description generation failed, using fallback");
            Ok(FALLBACK_DESCRIPTION.to_string())
        }
    }
}

fn truncate_words(text: &str, max: usize) -> String {
    text.split_whitespace().take(max).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::sample_draft;

    struct Failing;

    impl DescriptionGenerator for Failing {
        async fn generate(&self, _: &DescriptionRequest) -> Result<String, DescribeError> {
            Err(DescribeError::Backend("quota exceeded".to_string()))
        }
    }

    struct Blank;

    impl DescriptionGenerator for Blank {
        async fn generate(&self, _: &DescriptionRequest) -> Result<String, DescribeError> {
            Ok("   ".to_string())
        }
    }

    fn request() -> DescriptionRequest {
        let draft = sample_draft("Sunny Backroom", 1400);
        DescriptionRequest {
            title: draft.title,
            address: draft.address,
            price: draft.price,
            amenities: draft.amenities,
        }
    }

    #[tokio::test]
    async fn failures_and_blanks_use_fixed_text() {
        let req = request();
        assert_eq!(
            describe_or_fallback(&Failing, &req).await.unwrap(),
            FALLBACK_DESCRIPTION
        );
        assert_eq!(
            describe_or_fallback(&Blank, &req).await.unwrap(),
            EMPTY_DESCRIPTION
        );
    }

    #[tokio::test]
    async fn template_mentions_location_and_stays_short() {
        let req = request();
        let text = describe_or_fallback(&TemplateDescriber, &req).await.unwrap();
        assert!(text.contains("Soweto"));
        assert!(text.contains("R1400"));
        assert!(text.contains("water"));
        assert!(text.split_whitespace().count() <= MAX_WORDS);
    }

    #[tokio::test]
    async fn missing_title_or_price_is_reported() {
        let mut req = request();
        req.price = 0;
        assert_eq!(
            describe_or_fallback(&TemplateDescriber, &req).await,
            Err(DescribeError::MissingInput)
        );
    }

    #[test]
    fn prompt_carries_request_fields() {
        let prompt = request().prompt();
        assert!(prompt.contains("Name: Sunny Backroom"));
        assert!(prompt.contains("Rent: R1400"));
        assert!(prompt.contains("Wifi: Not Available"));
    }
}
