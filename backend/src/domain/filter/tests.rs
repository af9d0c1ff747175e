//! Unit coverage for the driver filter chain.

use super::*;
use crate::domain::{Car, CarAttributes, CarDraft, DriverDraft, DriverId, NewDriver};
use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};

fn car(id: i64, draft: CarDraft, rating: f64) -> Car {
    let attributes = CarAttributes::try_from(draft).expect("valid attributes");
    Car::with_rating_history(CarId::new(id), attributes, rating, 1).expect("valid rating")
}

fn bmw() -> Car {
    car(
        123,
        CarDraft {
            license_plate: "123LY".into(),
            seat_count: 2,
            convertible: false,
            engine_type: EngineType::Diesel,
            manufacturer: "BMW".into(),
        },
        4.0,
    )
}

fn mercedes() -> Car {
    car(
        456,
        CarDraft {
            license_plate: "456PT".into(),
            seat_count: 4,
            convertible: true,
            engine_type: EngineType::Gas,
            manufacturer: "Mercedes".into(),
        },
        3.0,
    )
}

fn driver(
    id: i64,
    username: &str,
    status: OnlineStatus,
    coordinate: Option<(f64, f64)>,
    car: Option<Car>,
) -> Driver {
    let created_at = Utc
        .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
        .single()
        .expect("valid timestamp");
    let registration = NewDriver::try_from(DriverDraft {
        username: username.into(),
        password: format!("{username}pw"),
    })
    .expect("valid driver");
    let mut driver = Driver::new(DriverId::new(id), registration, created_at);
    driver.set_online_status(status);
    if let Some((lat, lon)) = coordinate {
        let coordinate = GeoCoordinate::new(lat, lon).expect("valid coordinate");
        driver.relocate(coordinate, created_at);
    }
    if let Some(car) = car {
        driver.assign_car(car);
    }
    driver
}

#[fixture]
fn fleet() -> Vec<Driver> {
    vec![
        driver(1, "admin", OnlineStatus::Online, Some((10.0, 10.0)), Some(bmw())),
        driver(2, "driver02", OnlineStatus::Online, Some((-10.0, 80.0)), Some(mercedes())),
        driver(3, "driver03", OnlineStatus::Offline, Some((10.0, 10.0)), None),
        driver(4, "administrator", OnlineStatus::Offline, None, None),
    ]
}

fn ids(drivers: &[Driver]) -> Vec<i64> {
    drivers.iter().map(|driver| driver.id().get()).collect()
}

#[rstest]
#[case("")]
#[case("colour:red")]
#[case("garbage")]
fn empty_chain_is_identity(fleet: Vec<Driver>, #[case] query: &str) {
    let expected = ids(&fleet);
    let filtered = filter_drivers(query, fleet).expect("valid query");
    assert_eq!(ids(&filtered), expected);
}

#[rstest]
#[case("car.rating:4,car.seatCount:2", vec![1])]
#[case("car.rating<4,car.seatCount<5", vec![2])]
#[case("car.rating>3,car.seatCount>1", vec![1])]
#[case("onlineStatus:ONLINE,username:admin,coordinate:10^10", vec![1])]
#[case("car.id:123,car.manufacturer:BMW", vec![1])]
#[case("car.convertible:true,car.engineType:GAS", vec![2])]
#[case("username:admin", vec![1, 4])]
#[case("username:Admin", vec![])]
#[case("coordinate:10^10", vec![1, 3])]
#[case("onlineStatus:offline", vec![3, 4])]
#[case("car.manufacturer:e", vec![2])]
#[case("car.convertible:false", vec![1])]
#[case("car.convertible:yes", vec![1])]
#[case("car.engineType:diesel", vec![1])]
#[case("car.seatCount>1", vec![1, 2])]
#[case("car.id:999", vec![])]
fn narrows_fleet(fleet: Vec<Driver>, #[case] query: &str, #[case] expected: Vec<i64>) {
    let filtered = filter_drivers(query, fleet).expect("valid query");
    assert_eq!(ids(&filtered), expected);
}

#[rstest]
fn drivers_without_car_never_match_car_stages(fleet: Vec<Driver>) {
    let carless: Vec<Driver> = fleet.into_iter().filter(|d| d.car().is_none()).collect();
    for query in [
        "car.id:1",
        "car.manufacturer:M",
        "car.rating>-1",
        "car.convertible:false",
        "car.seatCount>0",
        "car.engineType:GAS",
    ] {
        let filtered = filter_drivers(query, carless.clone()).expect("valid query");
        assert!(filtered.is_empty(), "{query} matched a driver without a car");
    }
}

#[rstest]
#[case("coordinate:10")]
#[case("coordinate:10^")]
#[case("coordinate:a^b")]
#[case("coordinate:100^10")]
fn rejects_malformed_coordinates(fleet: Vec<Driver>, #[case] query: &str) {
    let error = filter_drivers(query, fleet).expect_err("malformed coordinate");
    assert!(matches!(error, FilterError::GeoCoordinateCreation(_)));
}

#[rstest]
#[case("onlineStatus:BUSY", "online status")]
#[case("car.engineType:STEAM", "engine type")]
fn rejects_unknown_enum_tokens(fleet: Vec<Driver>, #[case] query: &str, #[case] kind: &str) {
    let error = filter_drivers(query, fleet).expect_err("unknown token");
    match error {
        FilterError::InvalidEnumValue { kind: actual, .. } => assert_eq!(actual, kind),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[rstest]
#[case("car.rating:high")]
#[case("car.seatCount>two")]
#[case("car.id:12x")]
fn rejects_non_numeric_values(fleet: Vec<Driver>, #[case] query: &str) {
    let error = filter_drivers(query, fleet).expect_err("non numeric");
    assert!(matches!(error, FilterError::MalformedQuery { .. }));
}

#[test]
fn bad_values_are_reported_for_empty_input() {
    let error = filter_drivers("username:nobody,car.rating:x", Vec::new()).expect_err("bad value");
    assert!(matches!(error, FilterError::MalformedQuery { key: "car.rating", .. }));
}

#[test]
fn operators_only_matter_for_ordered_attributes() {
    let fleet = vec![driver(1, "admin", OnlineStatus::Online, None, Some(bmw()))];
    let filtered = filter_drivers("username<admin", fleet).expect("valid query");
    assert_eq!(ids(&filtered), vec![1]);
}

#[test]
fn stages_run_in_fixed_order() {
    let criteria = Criteria::parse("car.engineType:GAS,username:a,coordinate:1^1,car.id:3");
    let chain = FilterChain::from_criteria(&criteria).expect("valid criteria");
    let keys: Vec<FilterKey> = chain.active_stages().map(|(key, _)| key).collect();
    assert_eq!(
        keys,
        vec![
            FilterKey::Coordinate,
            FilterKey::Username,
            FilterKey::CarId,
            FilterKey::CarEngineType,
        ]
    );
}

#[rstest]
#[case(Operator::Lt, 3, true)]
#[case(Operator::Lt, 4, false)]
#[case(Operator::Gt, 5, true)]
#[case(Operator::Gt, 4, false)]
#[case(Operator::Eq, 4, true)]
#[case(Operator::Eq, 3, false)]
fn comparison_is_strict(#[case] operator: Operator, #[case] actual: i32, #[case] expected: bool) {
    let comparison = Comparison {
        operator,
        threshold: 4,
    };
    assert_eq!(comparison.matches(&actual), expected);
}
