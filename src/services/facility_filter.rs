//! Facility search filter: wire parameters, typed filter, and the predicate
//! builder that folds whichever criteria are present into one SQL condition.
//!
//! Every subset of the five optional criteria resolves to exactly one
//! retrieval behavior. [`FilterSelection`] names the active subset and is the
//! routing contract the tests pin down; the builders below derive the
//! condition from the same presence checks, so selection and predicate can
//! never disagree.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use sea_orm::sea_query::SimpleExpr;
use sea_orm::{ColumnTrait, Condition};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::entities::facility;
use crate::errors::ServiceError;
use crate::models::facility::FacilityType;
use crate::services::geo;

/// Raw query parameters accepted by the facility listing endpoints.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FacilityFilterParams {
    /// Campus code, matched case-insensitively
    pub campus_code: Option<String>,
    /// Facility type; unrecognized values fall back to OFFICE
    pub facility_type: Option<String>,
    /// Only facilities with (or without) hoteling desks
    pub hoteling_site: Option<bool>,
    /// Center longitude for radius search; requires latitude
    pub longitude: Option<f64>,
    /// Center latitude for radius search; requires longitude
    pub latitude: Option<f64>,
    /// Search radius in miles; malformed or missing values default to 20
    pub distance: Option<String>,
    /// Only facilities created or updated after this instant
    pub date_at: Option<String>,
}

/// Geo criterion resolved from the wire: a center point plus radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearFilter {
    pub longitude: f64,
    pub latitude: f64,
    pub radius_miles: f64,
}

/// The typed facility search filter. Absent fields mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacilityFilter {
    pub campus_code: Option<String>,
    pub facility_type: Option<FacilityType>,
    pub hoteling_site: Option<bool>,
    pub near: Option<NearFilter>,
    pub date_at: Option<DateTime<Utc>>,
}

impl FacilityFilter {
    /// Resolves wire parameters into a typed filter.
    ///
    /// Blank campus and type values count as absent. A type value that is
    /// present but unrecognized resolves to OFFICE instead of failing. A
    /// lone longitude or latitude is rejected, and so is an unparseable
    /// `dateAt`; a bad `distance` silently takes the default radius.
    pub fn from_params(params: FacilityFilterParams) -> Result<Self, ServiceError> {
        let near = match (params.longitude, params.latitude) {
            (Some(longitude), Some(latitude)) => Some(NearFilter {
                longitude,
                latitude,
                radius_miles: geo::radius_miles_from_param(params.distance.as_deref()),
            }),
            (None, None) => None,
            _ => {
                return Err(ServiceError::ValidationError(
                    "longitude and latitude must be supplied together".into(),
                ))
            }
        };

        let date_at = params.date_at.as_deref().map(parse_date_at).transpose()?;

        Ok(Self {
            campus_code: params
                .campus_code
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            facility_type: params
                .facility_type
                .as_deref()
                .map(str::trim)
                .filter(|raw| !raw.is_empty())
                .map(|raw| raw.parse::<FacilityType>().unwrap_or_default()),
            hoteling_site: params.hoteling_site,
            near,
            date_at,
        })
    }
}

/// Parses the `dateAt` threshold: a full RFC 3339 instant or a plain
/// `YYYY-MM-DD` date taken as midnight UTC.
pub fn parse_date_at(raw: &str) -> Result<DateTime<Utc>, ServiceError> {
    let trimmed = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(|date| Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
        .map_err(|_| {
            ServiceError::ValidationError(format!(
                "dateAt must be an ISO date such as 2024-01-15T00:00:00Z, got '{}'",
                raw
            ))
        })
}

/// Which of the five criteria a filter populates. One selection exists per
/// presence assignment, and the same filter always classifies the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilterSelection {
    pub campus: bool,
    pub facility_type: bool,
    pub hoteling: bool,
    pub near: bool,
    pub date: bool,
}

impl FilterSelection {
    pub fn of(filter: &FacilityFilter) -> Self {
        Self {
            campus: filter.campus_code.is_some(),
            facility_type: filter.facility_type.is_some(),
            hoteling: filter.hoteling_site.is_some(),
            near: filter.near.is_some(),
            date: filter.date_at.is_some(),
        }
    }

    /// True when no criterion is populated and the unfiltered listing runs.
    pub fn is_unfiltered(&self) -> bool {
        !(self.campus || self.facility_type || self.hoteling || self.near || self.date)
    }

    /// Stable name for logs and spans, e.g. `campus+near` or `all`.
    pub fn label(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if self.campus {
            parts.push("campus");
        }
        if self.facility_type {
            parts.push("type");
        }
        if self.hoteling {
            parts.push("hoteling");
        }
        if self.near {
            parts.push("near");
        }
        if self.date {
            parts.push("date");
        }
        if parts.is_empty() {
            "all".to_string()
        } else {
            parts.join("+")
        }
    }
}

/// Condition for listing queries: geo criteria bound great-circle distance
/// in meters (the caller orders by distance separately).
pub fn list_condition(filter: &FacilityFilter) -> Condition {
    build_condition(filter, |near| {
        geo::within_distance_meters(
            near.longitude,
            near.latitude,
            geo::miles_to_meters(near.radius_miles),
        )
    })
}

/// Condition for count queries: geo criteria bound the central angle in
/// radians and stay unordered. Matches the same rows as [`list_condition`].
pub fn count_condition(filter: &FacilityFilter) -> Condition {
    build_condition(filter, |near| {
        geo::within_central_angle(
            near.longitude,
            near.latitude,
            geo::miles_to_radians(near.radius_miles),
        )
    })
}

fn build_condition(
    filter: &FacilityFilter,
    geo_predicate: impl Fn(&NearFilter) -> SimpleExpr,
) -> Condition {
    let mut condition = Condition::all();

    if let Some(campus) = &filter.campus_code {
        condition = condition.add(facility::Column::CampusCode.eq(campus.to_uppercase()));
    }

    if let Some(kind) = filter.facility_type {
        condition = condition.add(facility::Column::FacilityType.eq(kind));
    }

    if let Some(hoteling) = filter.hoteling_site {
        condition = condition.add(facility::Column::HotelingSite.eq(hoteling));
    }

    if let Some(near) = &filter.near {
        condition = condition.add(geo_predicate(near));
    }

    if let Some(threshold) = filter.date_at {
        condition = condition.add(
            Condition::any()
                .add(facility::Column::CreatedAt.gt(threshold))
                .add(facility::Column::UpdatedAt.gt(threshold)),
        );
    }

    condition
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};
    use std::collections::HashSet;

    fn filter_for_mask(mask: u8) -> FacilityFilter {
        FacilityFilter {
            campus_code: (mask & 1 != 0).then(|| "AUS".to_string()),
            facility_type: (mask & 2 != 0).then_some(FacilityType::Office),
            hoteling_site: (mask & 4 != 0).then_some(true),
            near: (mask & 8 != 0).then_some(NearFilter {
                longitude: -97.74,
                latitude: 30.27,
                radius_miles: 20.0,
            }),
            date_at: (mask & 16 != 0).then(|| Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap()),
        }
    }

    fn list_sql(filter: &FacilityFilter) -> String {
        facility::Entity::find()
            .filter(list_condition(filter))
            .build(DbBackend::Postgres)
            .to_string()
    }

    fn count_sql(filter: &FacilityFilter) -> String {
        facility::Entity::find()
            .filter(count_condition(filter))
            .build(DbBackend::Postgres)
            .to_string()
    }

    #[test]
    fn every_presence_assignment_classifies_to_exactly_one_selection() {
        let mut labels = HashSet::new();
        for mask in 0u8..32 {
            let filter = filter_for_mask(mask);
            let selection = FilterSelection::of(&filter);

            assert_eq!(selection.campus, mask & 1 != 0);
            assert_eq!(selection.facility_type, mask & 2 != 0);
            assert_eq!(selection.hoteling, mask & 4 != 0);
            assert_eq!(selection.near, mask & 8 != 0);
            assert_eq!(selection.date, mask & 16 != 0);

            // Classification is pure
            assert_eq!(selection, FilterSelection::of(&filter));
            labels.insert(selection.label());
        }
        // 32 distinct subsets, 32 distinct routes
        assert_eq!(labels.len(), 32);
    }

    #[test]
    fn empty_filter_builds_unfiltered_query() {
        let filter = FacilityFilter::default();
        assert!(FilterSelection::of(&filter).is_unfiltered());
        assert_eq!(FilterSelection::of(&filter).label(), "all");
        assert!(!list_sql(&filter).contains("WHERE"));
    }

    #[test]
    fn condition_contains_exactly_the_present_criteria() {
        for mask in 0u8..32 {
            let filter = filter_for_mask(mask);
            let sql = list_sql(&filter);

            assert_eq!(sql.contains("campus_code"), mask & 1 != 0, "mask {mask}");
            assert_eq!(sql.contains("facility_type"), mask & 2 != 0, "mask {mask}");
            assert_eq!(sql.contains("hoteling_site"), mask & 4 != 0, "mask {mask}");
            assert_eq!(sql.contains("acos("), mask & 8 != 0, "mask {mask}");
            assert_eq!(sql.contains("created_at"), mask & 16 != 0, "mask {mask}");
            assert_eq!(sql.contains("updated_at"), mask & 16 != 0, "mask {mask}");
        }
    }

    #[test]
    fn condition_building_is_deterministic() {
        let filter = filter_for_mask(0b11111);
        assert_eq!(list_sql(&filter), list_sql(&filter));
        assert_eq!(count_sql(&filter), count_sql(&filter));
    }

    #[test]
    fn list_and_count_geo_predicates_differ_but_match_the_same_radius() {
        let filter = filter_for_mask(8);
        let list = list_sql(&filter);
        let count = count_sql(&filter);

        assert_ne!(list, count);
        // List bounds meters
        let meters = format!("{}", geo::miles_to_meters(20.0));
        assert!(list.contains(&meters), "list sql: {list}");
        // Count bounds the central angle
        let radians = format!("{}", geo::miles_to_radians(20.0));
        assert!(count.contains(&radians), "count sql: {count}");
    }

    #[test]
    fn date_threshold_matches_either_timestamp() {
        let filter = filter_for_mask(16);
        let sql = list_sql(&filter);
        assert!(sql.contains("OR"), "sql: {sql}");
    }

    #[test]
    fn campus_code_is_uppercased_in_the_predicate() {
        let filter = FacilityFilter {
            campus_code: Some("aus".into()),
            ..Default::default()
        };
        let sql = list_sql(&filter);
        assert!(sql.contains("'AUS'"), "sql: {sql}");
    }

    #[test]
    fn from_params_defaults_unknown_type_to_office() {
        let filter = FacilityFilter::from_params(FacilityFilterParams {
            facility_type: Some("GARAGE".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(filter.facility_type, Some(FacilityType::Office));

        // Blank means absent, not OFFICE
        let filter = FacilityFilter::from_params(FacilityFilterParams {
            facility_type: Some("  ".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(filter.facility_type, None);
    }

    #[test]
    fn from_params_rejects_half_a_coordinate() {
        let err = FacilityFilter::from_params(FacilityFilterParams {
            longitude: Some(-97.74),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ServiceError::ValidationError(_)));
    }

    #[test]
    fn from_params_defaults_malformed_distance() {
        let filter = FacilityFilter::from_params(FacilityFilterParams {
            longitude: Some(-97.74),
            latitude: Some(30.27),
            distance: Some("not-a-number".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(filter.near.unwrap().radius_miles, geo::DEFAULT_RADIUS_MILES);
    }

    #[test]
    fn date_at_parses_date_and_instant_forms() {
        let from_date = parse_date_at("2024-01-15").unwrap();
        let from_instant = parse_date_at("2024-01-15T00:00:00Z").unwrap();
        assert_eq!(from_date, from_instant);

        let err = parse_date_at("01/15/2024").unwrap_err();
        assert!(matches!(err, ServiceError::ValidationError(msg) if msg.contains("dateAt")));
    }
}
