//! Client-facing projections of the catalog entities and their mappings.

pub mod category;
pub mod instagram_post;
pub mod product;

pub use category::CategoryDto;
pub use instagram_post::InstagramPostDto;
pub use product::ProductDto;
