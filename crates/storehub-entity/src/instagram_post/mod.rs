//! Instagram post domain.

pub mod model;

pub use model::InstagramPost;
