//! Tests for driver HTTP handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::{CarDraft, EngineType};
use crate::inbound::http::test_utils::{in_memory_state, test_app};

#[fixture]
fn state() -> HttpState {
    in_memory_state()
}

async fn seed_driver(state: &HttpState, username: &str, online: bool) -> DriverId {
    let driver = state
        .drivers
        .create_driver(DriverDraft {
            username: username.into(),
            password: "secret".into(),
        })
        .await
        .expect("driver created");
    if online {
        state
            .drivers
            .toggle_online_status(driver.id())
            .await
            .expect("driver online");
    }
    driver.id()
}

async fn seed_car(state: &HttpState) -> CarId {
    state
        .cars
        .create_car(CarDraft {
            license_plate: "123LY".into(),
            seat_count: 2,
            convertible: false,
            engine_type: EngineType::Diesel,
            manufacturer: "BMW".into(),
        })
        .await
        .expect("car created")
        .id()
}

fn error_code(body: &Value) -> &str {
    body.get("code")
        .and_then(Value::as_str)
        .expect("error payload carries a code")
}

#[rstest]
#[actix_web::test]
async fn create_driver_returns_created_without_password(state: HttpState) {
    let app = actix_test::init_service(test_app(state)).await;
    let req = actix_test::TestRequest::post()
        .uri("/v1/drivers")
        .set_json(json!({"username": "driver01", "password": "secret"}))
        .to_request();

    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(res).await;

    assert_eq!(body.get("username"), Some(&json!("driver01")));
    assert_eq!(body.get("onlineStatus"), Some(&json!("OFFLINE")));
    assert_eq!(body.get("car"), Some(&Value::Null));
    assert!(body.get("password").is_none());
}

#[rstest]
#[actix_web::test]
async fn duplicate_username_is_a_constraint_violation(state: HttpState) {
    seed_driver(&state, "driver01", false).await;
    let app = actix_test::init_service(test_app(state)).await;
    let req = actix_test::TestRequest::post()
        .uri("/v1/drivers")
        .set_json(json!({"username": "driver01", "password": "other"}))
        .to_request();

    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(error_code(&body), "constraints_violation");
}

#[rstest]
#[actix_web::test]
async fn unknown_driver_is_not_found(state: HttpState) {
    let app = actix_test::init_service(test_app(state)).await;
    let req = actix_test::TestRequest::get()
        .uri("/v1/drivers/404")
        .to_request();

    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(error_code(&body), "entity_not_found");
}

#[rstest]
#[actix_web::test]
async fn select_car_assigns_and_then_rejects_second_holder(state: HttpState) {
    let first = seed_driver(&state, "driver01", true).await;
    let second = seed_driver(&state, "driver02", true).await;
    let car_id = seed_car(&state).await;
    let app = actix_test::init_service(test_app(state)).await;

    let req = actix_test::TestRequest::patch()
        .uri(&format!("/v1/drivers/{first}/car?carId={car_id}"))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: DriverResponse = actix_test::read_body_json(res).await;
    let car = body.car.expect("car assigned");
    assert_eq!(car.id, car_id.get());
    assert_eq!(car.manufacturer, "BMW");

    let req = actix_test::TestRequest::patch()
        .uri(&format!("/v1/drivers/{second}/car?carId={car_id}"))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(error_code(&body), "car_already_in_use");
}

#[rstest]
#[actix_web::test]
async fn select_car_without_car_id_releases_car(state: HttpState) {
    let driver_id = seed_driver(&state, "driver01", true).await;
    let car_id = seed_car(&state).await;
    state
        .drivers
        .select_car(driver_id, Some(car_id))
        .await
        .expect("assigned");
    let app = actix_test::init_service(test_app(state)).await;

    let req = actix_test::TestRequest::patch()
        .uri(&format!("/v1/drivers/{driver_id}/car"))
        .to_request();
    let body: DriverResponse = actix_test::call_and_read_body_json(&app, req).await;

    assert!(body.car.is_none());
}

#[rstest]
#[actix_web::test]
async fn offline_driver_cannot_pick_car(state: HttpState) {
    let driver_id = seed_driver(&state, "driver01", false).await;
    let car_id = seed_car(&state).await;
    let app = actix_test::init_service(test_app(state)).await;

    let req = actix_test::TestRequest::patch()
        .uri(&format!("/v1/drivers/{driver_id}/car?carId={car_id}"))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(error_code(&body), "driver_offline_pick_car");
}

#[rstest]
#[actix_web::test]
async fn toggle_and_list_by_status(state: HttpState) {
    let driver_id = seed_driver(&state, "driver01", false).await;
    seed_driver(&state, "driver02", false).await;
    let app = actix_test::init_service(test_app(state)).await;

    let req = actix_test::TestRequest::patch()
        .uri(&format!("/v1/drivers/{driver_id}"))
        .to_request();
    let toggled: DriverResponse = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(toggled.online_status, "ONLINE");

    let req = actix_test::TestRequest::get()
        .uri("/v1/drivers?onlineStatus=online")
        .to_request();
    let online: Vec<DriverResponse> = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        online.iter().map(|driver| driver.id).collect::<Vec<_>>(),
        vec![driver_id.get()]
    );
}

#[rstest]
#[actix_web::test]
async fn list_by_status_rejects_unknown_status(state: HttpState) {
    let app = actix_test::init_service(test_app(state)).await;
    let req = actix_test::TestRequest::get()
        .uri("/v1/drivers?onlineStatus=AWAY")
        .to_request();

    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn update_location_records_coordinate(state: HttpState) {
    let driver_id = seed_driver(&state, "driver01", false).await;
    let app = actix_test::init_service(test_app(state)).await;

    let req = actix_test::TestRequest::put()
        .uri(&format!("/v1/drivers/{driver_id}?longitude=13.4&latitude=52.5"))
        .to_request();
    let body: DriverResponse = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        body.coordinate,
        Some(CoordinateBody {
            latitude: 52.5,
            longitude: 13.4,
        })
    );
    assert!(body.date_coordinate_updated.is_some());
}

#[rstest]
#[case("longitude=13.4&latitude=95", StatusCode::BAD_REQUEST, "geo_coordinate_creation")]
#[case("longitude=13.4", StatusCode::BAD_REQUEST, "invalid_request")]
#[actix_web::test]
async fn update_location_rejects_bad_input(
    state: HttpState,
    #[case] query: &str,
    #[case] status: StatusCode,
    #[case] code: &str,
) {
    let driver_id = seed_driver(&state, "driver01", false).await;
    let app = actix_test::init_service(test_app(state)).await;

    let req = actix_test::TestRequest::put()
        .uri(&format!("/v1/drivers/{driver_id}?{query}"))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), status);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(error_code(&body), code);
}

#[rstest]
#[actix_web::test]
async fn filter_matches_nested_car_fields(state: HttpState) {
    let holder = seed_driver(&state, "driver01", true).await;
    seed_driver(&state, "driver02", true).await;
    let car_id = seed_car(&state).await;
    state
        .drivers
        .select_car(holder, Some(car_id))
        .await
        .expect("assigned");
    let app = actix_test::init_service(test_app(state)).await;

    let req = actix_test::TestRequest::get()
        .uri("/v1/drivers/filter?search=onlineStatus:online,car.manufacturer:BMW")
        .to_request();
    let matched: Vec<DriverResponse> = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id, holder.get());
}

#[rstest]
#[case("/v1/drivers/filter?search=coordinate:abc", "geo_coordinate_creation")]
#[case("/v1/drivers/filter?search=onlineStatus:AWAY", "invalid_enum_value")]
#[case("/v1/drivers/filter?search=car.rating%3Efive", "malformed_query")]
#[case("/v1/drivers/filter", "invalid_request")]
#[actix_web::test]
async fn filter_reports_bad_criteria(state: HttpState, #[case] uri: &str, #[case] code: &str) {
    let app = actix_test::init_service(test_app(state)).await;
    let req = actix_test::TestRequest::get().uri(uri).to_request();

    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(error_code(&body), code);
}

#[rstest]
#[actix_web::test]
async fn deleted_driver_disappears(state: HttpState) {
    let driver_id = seed_driver(&state, "driver01", false).await;
    let app = actix_test::init_service(test_app(state)).await;

    let req = actix_test::TestRequest::delete()
        .uri(&format!("/v1/drivers/{driver_id}"))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let req = actix_test::TestRequest::get()
        .uri(&format!("/v1/drivers/{driver_id}"))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
