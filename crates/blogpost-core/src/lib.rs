//! # Blogpost Core
//!
//! The domain layer of the Blogpost service.
//! Users, posts and the follower graph, plus the ports the infrastructure
//! layer has to implement. No database or HTTP dependencies live here.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::DomainError;
