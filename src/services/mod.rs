//! Business logic services

pub mod catalog;
pub mod circulation;
pub mod reports;
pub mod reservations;

use crate::{config::CirculationConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub circulation: circulation::CirculationService,
    pub reservations: reservations::ReservationsService,
    pub reports: reports::ReportsService,
}

impl Services {
    /// Create all services with the given repository and circulation rules
    pub fn new(repository: Repository, circulation: CirculationConfig) -> Self {
        let reservations =
            reservations::ReservationsService::new(repository.clone(), circulation.clone());
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            circulation: circulation::CirculationService::new(
                repository.clone(),
                reservations.clone(),
                circulation,
            ),
            reservations,
            reports: reports::ReportsService::new(repository),
        }
    }
}
