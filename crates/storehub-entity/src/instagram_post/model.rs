//! Instagram post entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use storehub_core::traits::Entity;

/// A social media post. Carries no deletion flag, so it can only be
/// deleted physically.
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct InstagramPost {
    /// Unique post identifier.
    pub id: Uuid,
    /// Post title.
    pub title: String,
    /// Post body.
    pub description: String,
    /// Like counter.
    pub likes: i32,
}

impl Entity for InstagramPost {
    type Key = Uuid;
    const NAME: &'static str = "InstagramPost";

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }
}
