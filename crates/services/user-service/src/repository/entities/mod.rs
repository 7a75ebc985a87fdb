//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod advert;
pub mod message;
pub mod user;
pub mod user_advert;
pub mod user_message;

pub use advert::Entity as AdvertEntity;
pub use message::Entity as MessageEntity;
pub use user::Entity as UserEntity;
pub use user_advert::Entity as UserAdvertEntity;
pub use user_message::Entity as UserMessageEntity;
