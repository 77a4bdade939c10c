//! Custom Axum extractors.

pub mod body;
pub mod cancellation;
pub mod path;

pub use body::DtoBody;
pub use cancellation::RequestCancellation;
pub use path::EntityId;
