//! Table-driven cases for the pure write-path rules, one table per rule.

use assert_matches::assert_matches;
use rstest::rstest;
use serde_json::{json, Value};

use facilities_api::errors::ServiceError;
use facilities_api::models::address::Address;
use facilities_api::models::operational_hours::{OperationalHoursEntry, Weekday};
use facilities_api::services::facility_filter::{
    parse_date_at, FacilityFilter, FacilityFilterParams,
};
use facilities_api::validation::{check_address, check_blank_fields, check_operational_hours};

fn address(country: &str, zip: Option<&str>, state: Option<&str>) -> Address {
    Address {
        street1: "501 Congress Ave".into(),
        city: "Austin".into(),
        zip_code: zip.map(Into::into),
        state_code: state.map(Into::into),
        country_code: country.into(),
        ..Default::default()
    }
}

fn window(day: Weekday) -> OperationalHoursEntry {
    OperationalHoursEntry {
        day,
        open_time: "08:00".into(),
        close_time: "17:00".into(),
    }
}

#[rstest]
#[case::short_code_fails("USA", Some("22102"), Some("V"), false)]
#[case::two_characters_pass("USA", Some("22102"), Some("VA"), true)]
#[case::no_zip_is_exempt("USA", None, Some("V"), true)]
#[case::no_state_is_exempt("USA", Some("22102"), None, true)]
#[case::country_is_normalized(" usa ", Some("22102"), Some("V"), false)]
#[case::non_us_is_exempt("CAN", Some("T5J 0N3"), Some("A"), true)]
fn us_state_code_rule(
    #[case] country: &str,
    #[case] zip: Option<&str>,
    #[case] state: Option<&str>,
    #[case] ok: bool,
) {
    assert_eq!(check_address(&address(country, zip, state)).is_ok(), ok);
}

#[rstest]
#[case::distinct_days(&[Weekday::Monday, Weekday::Friday], true)]
#[case::empty_list(&[], true)]
#[case::single_day(&[Weekday::Sunday], true)]
#[case::adjacent_repeat(&[Weekday::Monday, Weekday::Monday], false)]
#[case::distant_repeat(&[Weekday::Friday, Weekday::Saturday, Weekday::Friday], false)]
fn duplicate_day_rule(#[case] days: &[Weekday], #[case] ok: bool) {
    let entries: Vec<_> = days.iter().copied().map(window).collect();
    assert_eq!(check_operational_hours(&entries).is_ok(), ok);
}

#[rstest]
#[case::visible_values(json!({"name": "HQ", "campusCode": "AUS"}), true)]
#[case::empty_string_passes(json!({"name": ""}), true)]
#[case::spaces_fail(json!({"name": "   "}), false)]
#[case::nested_tab_fails(json!({"address": {"city": "\t"}}), false)]
#[case::arrays_are_skipped(json!({"tags": ["  "]}), true)]
fn blank_field_rule(#[case] bag: Value, #[case] ok: bool) {
    assert_eq!(check_blank_fields(&bag).is_ok(), ok);
}

#[rstest]
#[case::us_format("01/15/2024")]
#[case::prose("yesterday")]
#[case::out_of_range("2024-13-40")]
fn malformed_date_thresholds_are_validation_errors(#[case] raw: &str) {
    assert_matches!(
        parse_date_at(raw),
        Err(ServiceError::ValidationError(msg)) if msg.contains("dateAt")
    );
}

#[rstest]
#[case::latitude_only(None, Some(30.27))]
#[case::longitude_only(Some(-97.74), None)]
fn lone_coordinates_are_validation_errors(
    #[case] longitude: Option<f64>,
    #[case] latitude: Option<f64>,
) {
    let params = FacilityFilterParams {
        longitude,
        latitude,
        ..Default::default()
    };
    assert_matches!(
        FacilityFilter::from_params(params),
        Err(ServiceError::ValidationError(msg)) if msg.contains("longitude and latitude")
    );
}
