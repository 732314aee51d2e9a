//! AniList access for the Jukey backend.
//!
//! Holds the GraphQL client, the named query documents, the partial upstream
//! schema and the mappers that turn it into the frontend-facing models.

pub mod anilist;
pub mod models;
pub mod traits;
