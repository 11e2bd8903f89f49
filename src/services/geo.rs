//! Distance conversions and the raw SQL predicates behind radius search.
//!
//! Two predicate forms exist on purpose. Listing queries bound the
//! great-circle distance in meters and order nearest-first; count queries
//! bound the central angle in radians and skip ordering entirely. Both
//! select the same set of rows for a given radius.

use sea_orm::sea_query::{Expr, SimpleExpr};

/// Radius applied when the caller omits the distance or sends something
/// unusable.
pub const DEFAULT_RADIUS_MILES: f64 = 20.0;

pub const METERS_PER_MILE: f64 = 1609.34;

/// Mean earth radius in statute miles, used to turn a distance into a
/// central angle.
pub const EARTH_RADIUS_MILES: f64 = 3963.2;

pub fn miles_to_meters(miles: f64) -> f64 {
    miles * METERS_PER_MILE
}

pub fn miles_to_radians(miles: f64) -> f64 {
    miles / EARTH_RADIUS_MILES
}

/// Resolves the radius for a query from the raw request value. Missing,
/// unparseable, non-finite, and non-positive inputs all fall back to
/// [`DEFAULT_RADIUS_MILES`].
pub fn radius_miles_from_param(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|miles| miles.is_finite() && *miles > 0.0)
        .unwrap_or(DEFAULT_RADIUS_MILES)
}

/// Great-circle distance in meters between the query point and each row's
/// denormalized coordinates. Rows with NULL coordinates drop out of any
/// comparison against this expression.
///
/// The LEAST clamp keeps acos in its domain when a row sits exactly on the
/// query point and floating-point rounding pushes the cosine above 1.
pub fn distance_meters_expr(longitude: f64, latitude: f64) -> SimpleExpr {
    Expr::cust_with_values(
        "acos(LEAST(1.0, sin(radians(?)) * sin(radians(latitude)) + cos(radians(?)) * cos(radians(latitude)) * cos(radians(longitude) - radians(?)))) * ?",
        [
            latitude,
            latitude,
            longitude,
            EARTH_RADIUS_MILES * METERS_PER_MILE,
        ],
    )
}

/// Predicate: row lies within `meters` of the query point, by great-circle
/// distance. Used by listing queries, which also order by
/// [`distance_meters_expr`].
pub fn within_distance_meters(longitude: f64, latitude: f64, meters: f64) -> SimpleExpr {
    Expr::cust_with_values(
        "acos(LEAST(1.0, sin(radians(?)) * sin(radians(latitude)) + cos(radians(?)) * cos(radians(latitude)) * cos(radians(longitude) - radians(?)))) * ? <= ?",
        [
            latitude,
            latitude,
            longitude,
            EARTH_RADIUS_MILES * METERS_PER_MILE,
            meters,
        ],
    )
}

/// Predicate: row lies within the spherical cap whose central angle is
/// `radians`. Used by count queries, which never order.
pub fn within_central_angle(longitude: f64, latitude: f64, radians: f64) -> SimpleExpr {
    Expr::cust_with_values(
        "acos(LEAST(1.0, sin(radians(?)) * sin(radians(latitude)) + cos(radians(?)) * cos(radians(latitude)) * cos(radians(longitude) - radians(?)))) <= ?",
        [latitude, latitude, longitude, radians],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mile_conversions() {
        assert!((miles_to_meters(1.0) - 1609.34).abs() < 1e-9);
        assert!((miles_to_meters(20.0) - 32186.8).abs() < 1e-6);
        assert!((miles_to_radians(3963.2) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn radius_defaults_when_missing_or_malformed() {
        assert_eq!(radius_miles_from_param(None), DEFAULT_RADIUS_MILES);
        assert_eq!(radius_miles_from_param(Some("")), DEFAULT_RADIUS_MILES);
        assert_eq!(radius_miles_from_param(Some("abc")), DEFAULT_RADIUS_MILES);
        assert_eq!(radius_miles_from_param(Some("-5")), DEFAULT_RADIUS_MILES);
        assert_eq!(radius_miles_from_param(Some("0")), DEFAULT_RADIUS_MILES);
        assert_eq!(radius_miles_from_param(Some("NaN")), DEFAULT_RADIUS_MILES);
        assert_eq!(radius_miles_from_param(Some("inf")), DEFAULT_RADIUS_MILES);
    }

    #[test]
    fn radius_accepts_plain_numbers() {
        assert_eq!(radius_miles_from_param(Some("5")), 5.0);
        assert_eq!(radius_miles_from_param(Some(" 12.5 ")), 12.5);
    }

    #[test]
    fn both_predicate_forms_bound_the_same_radius() {
        // 20 miles expressed in meters and as a central angle must describe
        // the same spherical cap.
        let meters = miles_to_meters(DEFAULT_RADIUS_MILES);
        let radians = miles_to_radians(DEFAULT_RADIUS_MILES);
        let angle_from_meters = meters / (EARTH_RADIUS_MILES * METERS_PER_MILE);
        assert!((angle_from_meters - radians).abs() < 1e-12);
    }
}
