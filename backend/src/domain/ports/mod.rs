//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod car_command;
mod car_query;
mod car_repository;
mod driver_command;
mod driver_query;
mod driver_repository;

#[cfg(test)]
pub use car_command::MockCarCommand;
pub use car_command::CarCommand;
#[cfg(test)]
pub use car_query::MockCarQuery;
pub use car_query::CarQuery;
#[cfg(test)]
pub use car_repository::MockCarRepository;
pub use car_repository::{CarRepository, CarRepositoryError};
#[cfg(test)]
pub use driver_command::MockDriverCommand;
pub use driver_command::DriverCommand;
#[cfg(test)]
pub use driver_query::MockDriverQuery;
pub use driver_query::DriverQuery;
#[cfg(test)]
pub use driver_repository::MockDriverRepository;
pub use driver_repository::{DriverRepository, DriverRepositoryError};
