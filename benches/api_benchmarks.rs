use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;

use chrono::{TimeZone, Utc};
use serde_json::json;

use facilities_api::models::facility::FacilityType;
use facilities_api::models::operational_hours::{OperationalHoursEntry, Weekday};
use facilities_api::services::facilities::{has_more, PageParams, PageRequest};
use facilities_api::services::facility_filter::{
    count_condition, list_condition, FacilityFilter, FacilityFilterParams, FilterSelection,
    NearFilter,
};
use facilities_api::validation::{check_blank_fields, check_operational_hours};

fn filter_with_criteria(count: u8) -> FacilityFilter {
    FacilityFilter {
        campus_code: (count >= 1).then(|| "AUS".to_string()),
        facility_type: (count >= 2).then_some(FacilityType::Office),
        hoteling_site: (count >= 3).then_some(true),
        near: (count >= 4).then_some(NearFilter {
            longitude: -97.74,
            latitude: 30.27,
            radius_miles: 20.0,
        }),
        date_at: (count >= 5).then(|| Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap()),
    }
}

// Benchmark for building the SQL condition from a resolved filter
fn condition_building_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("condition_building");

    for criteria in [0u8, 1, 3, 5].iter() {
        let filter = filter_with_criteria(*criteria);
        group.bench_with_input(
            BenchmarkId::new("list", criteria),
            &filter,
            |b, filter| {
                b.iter(|| {
                    let condition = list_condition(black_box(filter));
                    black_box(condition)
                });
            },
        );
        group.bench_with_input(
            BenchmarkId::new("count", criteria),
            &filter,
            |b, filter| {
                b.iter(|| {
                    let condition = count_condition(black_box(filter));
                    black_box(condition)
                });
            },
        );
    }

    group.finish();
}

// Benchmark for resolving wire parameters into a typed filter
fn filter_resolution_benchmark(c: &mut Criterion) {
    c.bench_function("filter_from_params", |b| {
        b.iter(|| {
            let params = FacilityFilterParams {
                campus_code: Some(black_box("aus".to_string())),
                facility_type: Some("WAREHOUSE".to_string()),
                hoteling_site: Some(true),
                longitude: Some(-97.74),
                latitude: Some(30.27),
                distance: Some("25".to_string()),
                date_at: Some("2024-01-15".to_string()),
            };
            let filter = FacilityFilter::from_params(params).unwrap();
            black_box(FilterSelection::of(&filter).label())
        });
    });
}

// Benchmark for the write-path validators
fn validator_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("validators");

    let bag = json!({
        "id": "AUS10",
        "name": "Congress Avenue Tower",
        "campusCode": "AUS",
        "timeZone": "America/Chicago",
        "address": {
            "street1": "501 Congress Ave",
            "city": "Austin",
            "zipCode": "78701",
            "stateCode": "TX",
            "countryCode": "USA"
        }
    });
    group.bench_function("blank_fields", |b| {
        b.iter(|| {
            let result = check_blank_fields(black_box(&bag));
            black_box(result)
        });
    });

    let week: Vec<OperationalHoursEntry> = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ]
    .into_iter()
    .map(|day| OperationalHoursEntry {
        day,
        open_time: "08:00".into(),
        close_time: "17:00".into(),
    })
    .collect();
    group.bench_function("operational_hours", |b| {
        b.iter(|| {
            let result = check_operational_hours(black_box(&week));
            black_box(result)
        });
    });

    group.finish();
}

// Benchmark for paging window resolution
fn paging_benchmark(c: &mut Criterion) {
    c.bench_function("page_window", |b| {
        b.iter(|| {
            let page = PageRequest::from_params(PageParams {
                skip: Some(black_box(75)),
                take: Some(black_box(500)),
            });
            black_box(has_more(1_000, page.skip, page.take))
        });
    });
}

// Benchmark for facility document serialization
fn json_serialization_benchmark(c: &mut Criterion) {
    let document = json!({
        "id": "AUS10",
        "name": "Congress Avenue Tower",
        "campusCode": "AUS",
        "facilityType": "OFFICE",
        "operationalStatus": "OPEN",
        "classificationType": "EXPORT_RESTRICTED",
        "hotelingSite": true,
        "address": {
            "street1": "501 Congress Ave",
            "city": "Austin",
            "zipCode": "78701",
            "stateCode": "TX",
            "state": "Texas",
            "countryCode": "USA",
            "country": "United States"
        },
        "operationalHours": [
            { "day": "MONDAY", "openTime": "08:00", "closeTime": "17:00" },
            { "day": "FRIDAY", "openTime": "08:00", "closeTime": "15:00" }
        ]
    });

    c.bench_function("facility_serialize", |b| {
        b.iter(|| {
            let serialized = serde_json::to_string(&document).unwrap();
            black_box(serialized)
        });
    });

    c.bench_function("facility_deserialize", |b| {
        let serialized = serde_json::to_string(&document).unwrap();
        b.iter(|| {
            let deserialized: serde_json::Value = serde_json::from_str(&serialized).unwrap();
            black_box(deserialized)
        });
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(10))
        .sample_size(100);
    targets =
        condition_building_benchmark,
        filter_resolution_benchmark,
        validator_benchmark,
        paging_benchmark,
        json_serialization_benchmark
}

criterion_main!(benches);
