//! Port abstraction for car persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Car, CarAttributes, CarId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by car repository adapters.
    pub enum CarRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "car repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "car repository query failed: {message}",
    }
}

/// Storage for cars. Soft-deleted cars are invisible to every lookup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Store a new unrated car and return it with its assigned identifier.
    async fn insert(&self, attributes: &CarAttributes) -> Result<Car, CarRepositoryError>;

    async fn save(&self, car: &Car) -> Result<(), CarRepositoryError>;

    async fn find_by_id(&self, id: CarId) -> Result<Option<Car>, CarRepositoryError>;

    /// Every active car, ordered by identifier.
    async fn list(&self) -> Result<Vec<Car>, CarRepositoryError>;
}
