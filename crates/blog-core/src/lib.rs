//! # Blog Core
//!
//! The domain layer of the blog service.
//! Posts, the errors they can produce, and the store port the infrastructure implements.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError};
