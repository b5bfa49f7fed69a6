use kernel::prelude::entity::{DestructGenre, Genre, SelectLimit, SelectOffset};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct GenreDto {
    pub id: Uuid,
    pub name: String,
}

impl From<Genre> for GenreDto {
    fn from(value: Genre) -> Self {
        let DestructGenre { id, name } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug)]
pub struct GetGenreDto {
    pub id: Uuid,
}

#[derive(Debug)]
pub struct GetAllGenreDto {
    pub limit: SelectLimit,
    pub offset: SelectOffset,
}

#[derive(Debug)]
pub struct CreateGenreDto {
    pub name: String,
}

#[derive(Debug)]
pub struct UpdateGenreDto {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug)]
pub struct DeleteGenreDto {
    pub id: Uuid,
}
