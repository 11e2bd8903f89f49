use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Postal address embedded in facilities, amenities, and transportation
/// options. `state` and `country` are derived fields: the write path fills
/// them from the reference tables, callers only supply the codes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[validate(length(min = 1, message = "street1 is required"))]
    pub street1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[validate(length(min = 1, message = "countryCode is required"))]
    pub country_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Address {
    /// Country code with surrounding whitespace stripped and uppercased,
    /// the form the reference lookups and the US state rule compare against.
    pub fn normalized_country_code(&self) -> String {
        self.country_code.trim().to_uppercase()
    }
}
