//! Frontend-facing response models.
//!
//! These are the stable JSON shapes served by the backend. They are built
//! fresh from one upstream response and never stored.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Shown in place of a required name the upstream left out.
pub const NAME_PLACEHOLDER: &str = "—";

/// AniList's default avatar, used when a user has none.
pub const DEFAULT_AVATAR_URL: &str =
    "https://s4.anilist.co/file/anilistcdn/user/avatar/large/default.png";

const COVER_FALLBACK_PREFIX: &str =
    "https://s4.anilist.co/file/anilistcdn/media/anime/cover/large/bx";

/// Deterministic cover URL for a media id.
pub fn fallback_cover_url(id: u64) -> String {
    format!("{COVER_FALLBACK_PREFIX}{id}.png")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Title {
    pub romaji: Option<String>,
    pub english: Option<String>,
    pub native: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CoverImage {
    pub extra_large: Option<String>,
    pub large: Option<String>,
    pub medium: Option<String>,
}

impl CoverImage {
    /// First non-empty variant, largest first.
    pub fn preferred(&self) -> Option<&str> {
        [&self.extra_large, &self.large, &self.medium]
            .into_iter()
            .filter_map(|url| url.as_deref())
            .find(|url| !url.is_empty())
    }
}

/// A partial calendar date; AniList leaves any component unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PartialDate {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

/// Compact media card used in every list.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaSummary {
    pub id: u64,
    pub title: Title,
    pub media_type: Option<String>,
    pub format: Option<String>,
    pub status: Option<String>,
    pub season: Option<String>,
    pub season_year: Option<u32>,
    pub average_score: Option<u32>,
    pub popularity: Option<u32>,
    pub cover_image: Option<CoverImage>,
}

impl MediaSummary {
    /// Best cover URL, falling back to the id-keyed CDN path.
    ///
    /// Derived from the current fields on every call.
    pub fn cover_image_url(&self) -> String {
        self.cover_image
            .as_ref()
            .and_then(CoverImage::preferred)
            .map(str::to_string)
            .unwrap_or_else(|| fallback_cover_url(self.id))
    }
}

impl Serialize for MediaSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("MediaSummary", 11)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("title", &self.title)?;
        s.serialize_field("type", &self.media_type)?;
        s.serialize_field("format", &self.format)?;
        s.serialize_field("status", &self.status)?;
        s.serialize_field("season", &self.season)?;
        s.serialize_field("season_year", &self.season_year)?;
        s.serialize_field("average_score", &self.average_score)?;
        s.serialize_field("popularity", &self.popularity)?;
        s.serialize_field("cover_image", &self.cover_image)?;
        s.serialize_field("cover_image_url", &self.cover_image_url())?;
        s.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Studio {
    pub id: u64,
    pub name: String,
    pub is_animation_studio: bool,
}

/// Character or staff member as it appears inside another entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonSummary {
    pub id: u64,
    pub name_full: String,
    pub name_native: Option<String>,
    pub image_large: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterRole {
    #[serde(flatten)]
    pub character: PersonSummary,
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaRelation {
    pub relation_type: Option<String>,
    pub media: MediaSummary,
}

/// Full media page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaDetails {
    #[serde(flatten)]
    pub summary: MediaSummary,
    pub description: Option<String>,
    pub episodes: Option<u32>,
    pub duration: Option<u32>,
    pub chapters: Option<u32>,
    pub volumes: Option<u32>,
    pub favourites: Option<u32>,
    pub banner_image: Option<String>,
    pub genres: Vec<String>,
    pub synonyms: Vec<String>,
    pub start_date: Option<PartialDate>,
    pub end_date: Option<PartialDate>,
    pub studios: Vec<Studio>,
    pub characters: Vec<CharacterRole>,
    pub relations: Vec<MediaRelation>,
    pub site_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoiceActor {
    pub id: u64,
    pub name: String,
    pub name_native: Option<String>,
    pub image: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterProfile {
    pub id: u64,
    pub name_full: String,
    pub name_native: Option<String>,
    pub name_alternative: Vec<String>,
    pub image_large: Option<String>,
    pub description: Option<String>,
    pub favourites: Option<u32>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub blood_type: Option<String>,
    pub date_of_birth: Option<PartialDate>,
    pub media: Vec<MediaSummary>,
    pub voice_actors: Vec<VoiceActor>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaffProfile {
    pub id: u64,
    pub name_full: String,
    pub name_native: Option<String>,
    pub name_alternative: Vec<String>,
    pub image_large: Option<String>,
    pub description: Option<String>,
    pub primary_occupations: Vec<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<PartialDate>,
    pub date_of_death: Option<PartialDate>,
    pub age: Option<u32>,
    pub years_active: Vec<u32>,
    pub home_town: Option<String>,
    pub blood_type: Option<String>,
    pub favourites: Option<u32>,
    pub site_url: Option<String>,
    pub works: Vec<MediaSummary>,
    pub works_total: u32,
    pub works_has_next: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Avatar {
    pub large: Option<String>,
    pub medium: Option<String>,
}

impl Avatar {
    pub fn url(&self) -> String {
        [&self.large, &self.medium]
            .into_iter()
            .filter_map(|url| url.as_deref())
            .find(|url| !url.is_empty())
            .unwrap_or(DEFAULT_AVATAR_URL)
            .to_string()
    }
}

impl Serialize for Avatar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Avatar", 3)?;
        s.serialize_field("large", &self.large)?;
        s.serialize_field("medium", &self.medium)?;
        s.serialize_field("url", &self.url())?;
        s.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimeStatistics {
    pub count: Option<u32>,
    pub mean_score: Option<f64>,
    pub minutes_watched: Option<u64>,
    pub episodes_watched: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MangaStatistics {
    pub count: Option<u32>,
    pub mean_score: Option<f64>,
    pub chapters_read: Option<u32>,
    pub volumes_read: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserStatistics {
    pub anime: Option<AnimeStatistics>,
    pub manga: Option<MangaStatistics>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserFavourites {
    pub anime: Vec<MediaSummary>,
    pub manga: Vec<MediaSummary>,
    pub characters: Vec<PersonSummary>,
    pub staff: Vec<PersonSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub id: u64,
    pub name: String,
    pub avatar: Avatar,
    pub banner_image: Option<String>,
    pub about: Option<String>,
    pub statistics: Option<UserStatistics>,
    pub favourites: UserFavourites,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
    pub site_url: Option<String>,
    pub donator_tier: Option<u32>,
    pub moderator_roles: Vec<String>,
}

/// A character whose birthday is today, with only their best-known media.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthdayEntry {
    pub id: u64,
    pub name_full: String,
    pub name_native: Option<String>,
    pub image_large: Option<String>,
    pub favourites: Option<u32>,
    pub anime_title_romaji: Option<String>,
    pub anime_title_english: Option<String>,
}
