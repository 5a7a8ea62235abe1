mod aggregate;
mod domain_service;
mod repository;


pub use aggregate::{CheckIn, CheckInStatus};
pub use domain_service::CheckInDomainService;
pub use repository::{CheckInFilter, CheckInRepository};
