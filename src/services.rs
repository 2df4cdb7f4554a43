pub mod admin_service;
pub use admin_service::AdminService;
pub mod availability_service;
pub use availability_service::AvailabilityService;
pub mod booking_service;
pub use booking_service::BookingService;
pub mod catalog_service;
pub use catalog_service::CatalogService;
pub mod quota;
