//! HotelHub Session — credential verification, opaque token
//! generation, and session lifecycle orchestration.

pub mod config;
pub mod error;
pub mod password;
pub mod service;
pub mod token;

pub use config::SessionConfig;
pub use error::SessionError;
pub use service::{IssuedToken, SessionService};
