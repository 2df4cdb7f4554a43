pub mod blackout_repo;
pub use blackout_repo::BlackoutRepository;
pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod profile_repo;
pub use profile_repo::ProfileRepository;
pub mod reservation_repo;
pub use reservation_repo::ReservationRepository;
