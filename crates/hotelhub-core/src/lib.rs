//! HotelHub Core — domain models, error types, and the repository
//! traits implemented by the database layer.

pub mod clock;
pub mod error;
pub mod models;
pub mod repository;

pub use clock::{Clock, SystemClock};
pub use error::{HubError, HubResult};
