//! # storehub-entity
//!
//! Persisted records for StoreHub. Every struct in this crate represents a
//! database table row. All entities derive `Debug`, `Clone`, `Serialize`,
//! `Deserialize`, and `sqlx::FromRow`, and implement the capability traits
//! from `storehub-core` that the generic CRUD pipeline relies on.

pub mod category;
pub mod instagram_post;
pub mod product;

pub use category::Category;
pub use instagram_post::InstagramPost;
pub use product::Product;
