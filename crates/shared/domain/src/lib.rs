//! Domain layer - Core entities and value objects for the user directory.
//!
//! This crate contains pure domain logic with no store dependencies.
//! Persistence lives in the `user-service` crate.

pub mod advert;
pub mod constants;
pub mod error;
pub mod message;
pub mod pagination;
pub mod password;
pub mod user;

pub use advert::Advert;
pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use message::Message;
pub use pagination::{PageRequest, UserPage};
pub use password::{Argon2Encryption, PasswordEncryption};
pub use user::{NewUser, UpdateOutcome, User, UserSettings};
