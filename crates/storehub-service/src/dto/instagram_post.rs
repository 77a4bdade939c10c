//! Instagram post DTO.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storehub_core::traits::{Dto, MapFrom};
use storehub_entity::InstagramPost;

/// Instagram post as exchanged with clients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstagramPostDto {
    pub id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub likes: i32,
}

impl Dto for InstagramPostDto {
    type Key = Uuid;

    fn id(&self) -> Option<Uuid> {
        self.id
    }
}

impl MapFrom<InstagramPost> for InstagramPostDto {
    fn map_from(source: &InstagramPost) -> Self {
        Self {
            id: Some(source.id),
            title: source.title.clone(),
            description: source.description.clone(),
            likes: source.likes,
        }
    }

    fn map_onto(&mut self, source: &InstagramPost) {
        *self = Self::map_from(source);
    }
}

impl MapFrom<InstagramPostDto> for InstagramPost {
    fn map_from(source: &InstagramPostDto) -> Self {
        InstagramPost {
            id: source.id.unwrap_or_default(),
            title: source.title.clone(),
            description: source.description.clone(),
            likes: source.likes,
        }
    }

    fn map_onto(&mut self, source: &InstagramPostDto) {
        self.title.clone_from(&source.title);
        self.description.clone_from(&source.description);
        self.likes = source.likes;
    }
}
