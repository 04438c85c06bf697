pub mod catalog_service;
pub mod enrollment_service;

pub use catalog_service::CatalogService;
pub use enrollment_service::EnrollmentService;
