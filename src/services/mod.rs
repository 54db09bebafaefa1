pub mod categories;
pub mod errors;
pub mod products;
pub mod tags;

pub use errors::{ServiceError, ServiceResult};
