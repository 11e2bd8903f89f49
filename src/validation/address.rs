use crate::models::address::Address;

use super::ValidationIssue;

/// US-specific cross-check: when the country normalizes to USA and both a
/// zip code and a state code were supplied, the state code must be at least
/// two characters. Addresses elsewhere, or US addresses missing either
/// field, are not checked here.
pub fn check_address(address: &Address) -> Result<(), ValidationIssue> {
    if address.normalized_country_code() != "USA" {
        return Ok(());
    }

    let zip_present = address
        .zip_code
        .as_deref()
        .map(|z| !z.is_empty())
        .unwrap_or(false);
    let state_code = address.state_code.as_deref().filter(|s| !s.is_empty());

    if let (true, Some(code)) = (zip_present, state_code) {
        if code.len() < 2 {
            return Err(ValidationIssue::new(
                "stateCode must be at least 2 characters for US addresses",
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn us_address(zip: Option<&str>, state: Option<&str>) -> Address {
        Address {
            street1: "1765 Greensboro Station Pl".into(),
            city: "McLean".into(),
            zip_code: zip.map(Into::into),
            state_code: state.map(Into::into),
            country_code: "USA".into(),
            ..Default::default()
        }
    }

    #[test]
    fn one_character_state_code_fails_for_us() {
        let err = check_address(&us_address(Some("22102"), Some("V"))).unwrap_err();
        assert!(err.message().contains("stateCode"));
    }

    #[test]
    fn two_character_state_code_passes() {
        assert!(check_address(&us_address(Some("22102"), Some("VA"))).is_ok());
    }

    #[test]
    fn rule_only_applies_when_zip_and_state_both_present() {
        assert!(check_address(&us_address(None, Some("V"))).is_ok());
        assert!(check_address(&us_address(Some("22102"), None)).is_ok());
    }

    #[test]
    fn country_code_is_normalized_before_comparing() {
        let mut address = us_address(Some("22102"), Some("V"));
        address.country_code = " usa ".into();
        assert!(check_address(&address).is_err());
    }

    #[test]
    fn non_us_addresses_are_exempt() {
        let mut address = us_address(Some("T5J 0N3"), Some("A"));
        address.country_code = "CAN".into();
        assert!(check_address(&address).is_ok());
    }
}
