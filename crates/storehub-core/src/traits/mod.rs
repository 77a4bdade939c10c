//! Core traits defined in `storehub-core` and implemented by other crates.

pub mod entity;
pub mod mapper;
pub mod repository;

pub use entity::{Dto, Entity, EntityKey, SoftDelete};
pub use mapper::MapFrom;
pub use repository::Repository;
