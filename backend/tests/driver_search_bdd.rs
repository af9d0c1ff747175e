//! Behavioural tests for the driver search language.
//!
//! Scenarios run against the demo fleet seeded through the real services, so
//! criteria are parsed, filtered and mapped to errors exactly as they are for
//! HTTP callers.

use std::sync::Arc;

use fleet_backend::demo_data::seed_demo_fleet;
use fleet_backend::domain::ports::{CarCommand, DriverQuery};
use fleet_backend::domain::{CarService, DriverService, Error, FleetLocks};
use fleet_backend::outbound::memory::InMemoryFleetStore;
use mockable::DefaultClock;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use tokio::runtime::Runtime;

type Drivers = DriverService<InMemoryFleetStore, InMemoryFleetStore>;
type Cars = CarService<InMemoryFleetStore, InMemoryFleetStore>;

/// Services over one store plus the runtime that drives them.
#[derive(Clone)]
struct FleetHandle {
    runtime: Arc<Runtime>,
    drivers: Arc<Drivers>,
    cars: Arc<Cars>,
}

impl FleetHandle {
    fn new() -> Self {
        let store = Arc::new(InMemoryFleetStore::new());
        let locks = Arc::new(FleetLocks::new());
        Self {
            runtime: Arc::new(Runtime::new().expect("create runtime")),
            drivers: Arc::new(DriverService::new(
                Arc::clone(&store),
                Arc::clone(&store),
                Arc::clone(&locks),
                Arc::new(DefaultClock),
            )),
            cars: Arc::new(CarService::new(Arc::clone(&store), store, locks)),
        }
    }
}

#[derive(Default, ScenarioState)]
struct DriverSearchWorld {
    fleet: Slot<FleetHandle>,
    last_search: Slot<Result<Vec<String>, Error>>,
}

impl DriverSearchWorld {
    fn fleet(&self) -> FleetHandle {
        self.fleet.get().expect("the demo fleet should be seeded")
    }

    fn search(&self, query: &str) -> Result<Vec<String>, Error> {
        let fleet = self.fleet();
        fleet.runtime.block_on(async {
            let drivers = fleet.drivers.filter_drivers(query).await?;
            Ok(drivers
                .iter()
                .map(|driver| driver.username().to_owned())
                .collect())
        })
    }
}

#[fixture]
fn world() -> DriverSearchWorld {
    DriverSearchWorld::default()
}

#[given("the demo fleet")]
fn the_demo_fleet(world: &DriverSearchWorld) {
    let fleet = FleetHandle::new();
    fleet
        .runtime
        .block_on(seed_demo_fleet(fleet.drivers.as_ref(), fleet.cars.as_ref()))
        .expect("demo fleet seeds");
    world.fleet.set(fleet);
}

#[given("the car held by {username} is rated {rating}")]
fn the_car_held_by_is_rated(world: &DriverSearchWorld, username: String, rating: f64) {
    let fleet = world.fleet();
    fleet.runtime.block_on(async {
        let drivers = fleet
            .drivers
            .filter_drivers(&format!("username:{username}"))
            .await
            .expect("search succeeds");
        let car_id = drivers
            .first()
            .and_then(|driver| driver.car_id())
            .expect("driver holds a car");
        fleet
            .cars
            .rate_car(car_id, rating)
            .await
            .expect("rating accepted");
    });
}

#[when("drivers are searched with {query}")]
fn drivers_are_searched_with(world: &DriverSearchWorld, query: String) {
    let outcome = world.search(&query);
    world.last_search.set(outcome);
}

#[then("the matching drivers are {usernames}")]
fn the_matching_drivers_are(world: &DriverSearchWorld, usernames: String) {
    let matched = world
        .last_search
        .get()
        .expect("a search should have run")
        .expect("search should succeed");
    let expected: Vec<String> = usernames.split(',').map(str::to_owned).collect();
    assert_eq!(matched, expected);
}

#[then("the search fails with {code}")]
fn the_search_fails_with(world: &DriverSearchWorld, code: String) {
    let error = world
        .last_search
        .get()
        .expect("a search should have run")
        .expect_err("search should fail");
    assert_eq!(
        serde_json::to_value(error.code()).expect("code serialises"),
        serde_json::Value::String(code)
    );
}

#[scenario(
    path = "tests/features/driver_search.feature",
    name = "Online drivers holding a highly rated car"
)]
fn online_drivers_holding_a_highly_rated_car(world: DriverSearchWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/driver_search.feature",
    name = "Drivers at a coordinate"
)]
fn drivers_at_a_coordinate(world: DriverSearchWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/driver_search.feature",
    name = "Convertible cars with enough seats"
)]
fn convertible_cars_with_enough_seats(world: DriverSearchWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/driver_search.feature",
    name = "Unknown keys leave the fleet untouched"
)]
fn unknown_keys_leave_the_fleet_untouched(world: DriverSearchWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/driver_search.feature",
    name = "An unknown engine type is rejected"
)]
fn an_unknown_engine_type_is_rejected(world: DriverSearchWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/driver_search.feature",
    name = "A malformed coordinate is rejected"
)]
fn a_malformed_coordinate_is_rejected(world: DriverSearchWorld) {
    drop(world);
}
