//! Table mappings for the catalog entities.

use sqlx::Postgres;
use sqlx::query_builder::Separated;

use storehub_entity::{Category, InstagramPost, Product};

use super::postgres::PgEntity;

impl PgEntity for Product {
    const TABLE: &'static str = "products";
    const COLUMNS: &'static [&'static str] =
        &["name", "description", "cost", "category_id", "is_deleted"];

    fn push_values(&self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
        values
            .push_bind(self.name.clone())
            .push_bind(self.description.clone())
            .push_bind(self.cost)
            .push_bind(self.category_id)
            .push_bind(self.is_deleted);
    }
}

impl PgEntity for Category {
    const TABLE: &'static str = "categories";
    const COLUMNS: &'static [&'static str] = &["name", "is_deleted"];

    fn push_values(&self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
        values
            .push_bind(self.name.clone())
            .push_bind(self.is_deleted);
    }
}

impl PgEntity for InstagramPost {
    const TABLE: &'static str = "instagram_posts";
    const COLUMNS: &'static [&'static str] = &["title", "description", "likes"];

    fn push_values(&self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
        values
            .push_bind(self.title.clone())
            .push_bind(self.description.clone())
            .push_bind(self.likes);
    }
}
