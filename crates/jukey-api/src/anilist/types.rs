//! Partial AniList schema.
//!
//! Every field the upstream may omit or null out is an `Option`, and every
//! list goes through [`lenient_list`], so decoding only fails when a required
//! id is missing or a value has the wrong JSON type.

use serde::{Deserialize, Deserializer};

// ── GraphQL envelope ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQLErrorDetail>>,
}

/// One entry of the envelope's `errors` list.
///
/// Entries that are not objects still count as errors; their raw text becomes
/// the message.
#[derive(Debug, Clone)]
pub struct GraphQLErrorDetail {
    pub message: String,
    pub status: Option<u16>,
}

impl From<serde_json::Value> for GraphQLErrorDetail {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(fields) => Self {
                message: fields
                    .get("message")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                status: fields
                    .get("status")
                    .and_then(serde_json::Value::as_u64)
                    .and_then(|status| u16::try_from(status).ok()),
            },
            serde_json::Value::String(message) => Self {
                message,
                status: None,
            },
            other => Self {
                message: other.to_string(),
                status: None,
            },
        }
    }
}

impl<'de> Deserialize<'de> for GraphQLErrorDetail {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(Self::from)
    }
}

/// Absent, `null` and `null` elements all collapse into an empty or shorter list.
pub fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items: Option<Vec<Option<T>>> = Option::deserialize(deserializer)?;
    Ok(items.unwrap_or_default().into_iter().flatten().collect())
}

// ── Shared leaves ────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct AniListTitle {
    pub romaji: Option<String>,
    pub english: Option<String>,
    pub native: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverImage {
    pub extra_large: Option<String>,
    pub large: Option<String>,
    pub medium: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PersonImage {
    pub large: Option<String>,
    pub medium: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PersonName {
    pub full: Option<String>,
    pub native: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub alternative: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct FuzzyDate {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total: Option<u32>,
    pub current_page: Option<u32>,
    pub last_page: Option<u32>,
    pub has_next_page: Option<bool>,
}

// ── Media ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AniListMedia {
    pub id: u64,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub title: Option<AniListTitle>,
    pub format: Option<String>,
    pub status: Option<String>,
    pub season: Option<String>,
    pub season_year: Option<u32>,
    pub average_score: Option<u32>,
    pub popularity: Option<u32>,
    pub cover_image: Option<CoverImage>,
    pub description: Option<String>,
    pub episodes: Option<u32>,
    pub duration: Option<u32>,
    pub chapters: Option<u32>,
    pub volumes: Option<u32>,
    pub favourites: Option<u32>,
    pub banner_image: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub genres: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub synonyms: Vec<String>,
    pub site_url: Option<String>,
    pub start_date: Option<FuzzyDate>,
    pub end_date: Option<FuzzyDate>,
    pub studios: Option<StudioConnection>,
    pub characters: Option<CharacterConnection>,
    pub relations: Option<RelationConnection>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MediaConnection {
    #[serde(rename = "pageInfo")]
    pub page_info: Option<PageInfo>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub nodes: Vec<AniListMedia>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StudioConnection {
    #[serde(default, deserialize_with = "lenient_list")]
    pub nodes: Vec<StudioNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudioNode {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub is_animation_studio: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RelationConnection {
    #[serde(default, deserialize_with = "lenient_list")]
    pub edges: Vec<RelationEdge>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationEdge {
    pub relation_type: Option<String>,
    pub node: Option<AniListMedia>,
}

// ── Characters and staff ─────────────────────────────────────────

/// The id/name/image triple AniList returns for characters and staff nested
/// inside other entities.
#[derive(Debug, Deserialize)]
pub struct PersonNode {
    pub id: Option<u64>,
    pub name: Option<PersonName>,
    pub image: Option<PersonImage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CharacterConnection {
    #[serde(default, deserialize_with = "lenient_list")]
    pub edges: Vec<CharacterEdge>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub nodes: Vec<PersonNode>,
}

#[derive(Debug, Deserialize)]
pub struct CharacterEdge {
    pub role: Option<String>,
    pub node: Option<PersonNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AniListCharacter {
    pub id: u64,
    pub name: Option<PersonName>,
    pub image: Option<PersonImage>,
    pub description: Option<String>,
    pub favourites: Option<u32>,
    /// Free text upstream ("17", "17-18", "Unknown").
    pub age: Option<String>,
    pub gender: Option<String>,
    pub blood_type: Option<String>,
    pub date_of_birth: Option<FuzzyDate>,
    pub media: Option<CharacterMediaConnection>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CharacterMediaConnection {
    #[serde(default, deserialize_with = "lenient_list")]
    pub edges: Vec<CharacterMediaEdge>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub nodes: Vec<AniListMedia>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterMediaEdge {
    pub character_role: Option<String>,
    pub node: Option<AniListMedia>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub voice_actors: Vec<VoiceActorNode>,
}

#[derive(Debug, Deserialize)]
pub struct VoiceActorNode {
    pub id: Option<u64>,
    pub name: Option<PersonName>,
    pub image: Option<PersonImage>,
    #[serde(rename = "languageV2")]
    pub language: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AniListStaff {
    pub id: u64,
    pub name: Option<PersonName>,
    pub image: Option<PersonImage>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub primary_occupations: Vec<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<FuzzyDate>,
    pub date_of_death: Option<FuzzyDate>,
    pub age: Option<u32>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub years_active: Vec<u32>,
    pub home_town: Option<String>,
    pub blood_type: Option<String>,
    pub favourites: Option<u32>,
    pub site_url: Option<String>,
    pub staff_media: Option<MediaConnection>,
}

// ── Users ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AniListUser {
    pub id: u64,
    pub name: Option<String>,
    pub avatar: Option<PersonImage>,
    pub banner_image: Option<String>,
    pub about: Option<String>,
    pub statistics: Option<UserStatisticTypes>,
    pub favourites: Option<Favourites>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
    pub site_url: Option<String>,
    pub donator_tier: Option<u32>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub moderator_roles: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserStatisticTypes {
    pub anime: Option<UserAnimeStatistics>,
    pub manga: Option<UserMangaStatistics>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAnimeStatistics {
    pub count: Option<u32>,
    pub mean_score: Option<f64>,
    pub minutes_watched: Option<u64>,
    pub episodes_watched: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMangaStatistics {
    pub count: Option<u32>,
    pub mean_score: Option<f64>,
    pub chapters_read: Option<u32>,
    pub volumes_read: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Favourites {
    pub anime: Option<MediaConnection>,
    pub manga: Option<MediaConnection>,
    pub characters: Option<CharacterConnection>,
    pub staff: Option<CharacterConnection>,
}

// ── Query roots ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CharacterResponse {
    #[serde(rename = "Character")]
    pub character: Option<AniListCharacter>,
}

#[derive(Debug, Deserialize)]
pub struct StaffResponse {
    #[serde(rename = "Staff")]
    pub staff: Option<AniListStaff>,
}

#[derive(Debug, Deserialize)]
pub struct MediaResponse {
    #[serde(rename = "Media")]
    pub media: Option<AniListMedia>,
}

#[derive(Debug, Deserialize)]
pub struct UserResponse {
    #[serde(rename = "User")]
    pub user: Option<AniListUser>,
}

#[derive(Debug, Deserialize)]
pub struct ViewerResponse {
    #[serde(rename = "Viewer")]
    pub viewer: Option<AniListUser>,
}

#[derive(Debug, Deserialize)]
pub struct CharacterPageResponse {
    #[serde(rename = "Page")]
    pub page: Option<CharacterPage>,
}

#[derive(Debug, Deserialize)]
pub struct CharacterPage {
    #[serde(rename = "pageInfo")]
    pub page_info: Option<PageInfo>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub characters: Vec<AniListCharacter>,
}

#[derive(Debug, Deserialize)]
pub struct MediaPageResponse {
    #[serde(rename = "Page")]
    pub page: Option<MediaPage>,
}

#[derive(Debug, Deserialize)]
pub struct MediaPage {
    #[serde(rename = "pageInfo")]
    pub page_info: Option<PageInfo>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub media: Vec<AniListMedia>,
}
