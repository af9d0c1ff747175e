//! Demo fleet seeding.
//!
//! Populates an empty store with a handful of cars and drivers through the
//! driving ports, so every seeded assignment passes the same rules as a
//! live request.

use tracing::info;

use crate::domain::ports::{CarCommand, DriverCommand};
use crate::domain::{CarDraft, DriverDraft, EngineType, Error};

struct DemoDriver {
    username: &'static str,
    password: &'static str,
    location: Option<(f64, f64)>,
    online: bool,
    car_index: Option<usize>,
}

fn demo_cars() -> Vec<CarDraft> {
    vec![
        CarDraft {
            license_plate: "123LY".into(),
            seat_count: 2,
            convertible: false,
            engine_type: EngineType::Diesel,
            manufacturer: "BMW".into(),
        },
        CarDraft {
            license_plate: "456PT".into(),
            seat_count: 4,
            convertible: true,
            engine_type: EngineType::Gas,
            manufacturer: "Mercedes".into(),
        },
        CarDraft {
            license_plate: "789EV".into(),
            seat_count: 5,
            convertible: false,
            engine_type: EngineType::Electric,
            manufacturer: "Tesla".into(),
        },
    ]
}

const DEMO_DRIVERS: [DemoDriver; 4] = [
    DemoDriver {
        username: "driver01",
        password: "driver01pw",
        location: Some((10.0, 10.0)),
        online: true,
        car_index: Some(0),
    },
    DemoDriver {
        username: "driver02",
        password: "driver02pw",
        location: Some((-10.0, 80.0)),
        online: true,
        car_index: Some(1),
    },
    DemoDriver {
        username: "driver03",
        password: "driver03pw",
        location: Some((10.0, 10.0)),
        online: false,
        car_index: None,
    },
    DemoDriver {
        username: "driver04",
        password: "driver04pw",
        location: None,
        online: true,
        car_index: None,
    },
];

/// Counts of seeded entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoFleetOutcome {
    pub car_count: usize,
    pub driver_count: usize,
    pub assignment_count: usize,
}

/// Insert the demo fleet.
///
/// Fails on the first rejected operation, for example when the usernames
/// are already taken.
pub async fn seed_demo_fleet(
    drivers: &dyn DriverCommand,
    cars: &dyn CarCommand,
) -> Result<DemoFleetOutcome, Error> {
    let mut car_ids = Vec::new();
    for draft in demo_cars() {
        car_ids.push(cars.create_car(draft).await?.id());
    }

    let mut assignment_count = 0;
    for demo in &DEMO_DRIVERS {
        let driver = drivers
            .create_driver(DriverDraft {
                username: demo.username.to_owned(),
                password: demo.password.to_owned(),
            })
            .await?;
        let driver_id = driver.id();
        if let Some((latitude, longitude)) = demo.location {
            drivers
                .update_location(driver_id, longitude, latitude)
                .await?;
        }
        if demo.online {
            drivers.toggle_online_status(driver_id).await?;
        }
        if let Some(car_id) = demo.car_index.and_then(|index| car_ids.get(index)) {
            drivers.select_car(driver_id, Some(*car_id)).await?;
            assignment_count += 1;
        }
    }

    let outcome = DemoFleetOutcome {
        car_count: car_ids.len(),
        driver_count: DEMO_DRIVERS.len(),
        assignment_count,
    };
    info!(
        car_count = outcome.car_count,
        driver_count = outcome.driver_count,
        assignment_count = outcome.assignment_count,
        "demo fleet seeded"
    );
    Ok(outcome)
}
