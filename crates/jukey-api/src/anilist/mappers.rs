//! Conversions from the partial AniList schema into the response models.
//!
//! All defaulting happens here: absent sub-objects become `None` or empty
//! lists, required names get [`NAME_PLACEHOLDER`], and nothing in this module
//! can fail.

use std::collections::HashSet;

use super::types::{
    AniListCharacter, AniListMedia, AniListStaff, AniListTitle, AniListUser, CharacterConnection,
    CharacterMediaEdge, FuzzyDate, MediaConnection, PersonImage, PersonName, PersonNode,
    StudioNode, UserAnimeStatistics, UserMangaStatistics,
};
use crate::models::{
    AnimeStatistics, Avatar, BirthdayEntry, CharacterProfile, CharacterRole, CoverImage,
    MangaStatistics, MediaDetails, MediaRelation, MediaSummary, PartialDate, PersonSummary,
    StaffProfile, Studio, Title, UserFavourites, UserProfile, UserStatistics, VoiceActor,
    NAME_PLACEHOLDER,
};

/// Upper bound on media listed on a character page.
pub const CHARACTER_MEDIA_LIMIT: usize = 10;

// ── Leaves ───────────────────────────────────────────────────────

fn full_name(name: Option<&PersonName>) -> String {
    name.and_then(|n| n.full.as_deref())
        .map(str::trim)
        .filter(|full| !full.is_empty())
        .unwrap_or(NAME_PLACEHOLDER)
        .to_string()
}

fn large_image(image: Option<PersonImage>) -> Option<String> {
    image.and_then(|i| i.large.or(i.medium))
}

impl From<AniListTitle> for Title {
    fn from(t: AniListTitle) -> Self {
        Self {
            romaji: t.romaji,
            english: t.english,
            native: t.native,
        }
    }
}

impl From<FuzzyDate> for PartialDate {
    fn from(d: FuzzyDate) -> Self {
        Self {
            year: d.year,
            month: d.month,
            day: d.day,
        }
    }
}

/// AniList returns `{year: null, month: null, day: null}` for unknown dates.
fn known_date(date: Option<FuzzyDate>) -> Option<PartialDate> {
    date.filter(|d| d.year.is_some() || d.month.is_some() || d.day.is_some())
        .map(PartialDate::from)
}

impl PersonNode {
    /// `None` when the node has no id to link to.
    pub fn into_summary(self) -> Option<PersonSummary> {
        let id = self.id?;
        Some(PersonSummary {
            id,
            name_full: full_name(self.name.as_ref()),
            name_native: self.name.and_then(|n| n.native),
            image_large: large_image(self.image),
        })
    }
}

impl StudioNode {
    fn into_studio(self) -> Option<Studio> {
        Some(Studio {
            id: self.id?,
            name: self.name.unwrap_or_else(|| NAME_PLACEHOLDER.to_string()),
            is_animation_studio: self.is_animation_studio.unwrap_or(false),
        })
    }
}

// ── Media ────────────────────────────────────────────────────────

impl AniListMedia {
    pub fn into_summary(mut self) -> MediaSummary {
        self.take_summary()
    }

    pub fn into_details(mut self) -> MediaDetails {
        let summary = self.take_summary();

        let studios = self
            .studios
            .map(|s| s.nodes)
            .unwrap_or_default()
            .into_iter()
            .filter_map(StudioNode::into_studio)
            .collect();

        let characters = self
            .characters
            .map(|c| c.edges)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|edge| {
                let character = edge.node?.into_summary()?;
                Some(CharacterRole {
                    character,
                    role: edge.role,
                })
            })
            .collect();

        let relations = self
            .relations
            .map(|r| r.edges)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|edge| {
                Some(MediaRelation {
                    relation_type: edge.relation_type,
                    media: edge.node?.into_summary(),
                })
            })
            .collect();

        MediaDetails {
            summary,
            description: self.description,
            episodes: self.episodes,
            duration: self.duration,
            chapters: self.chapters,
            volumes: self.volumes,
            favourites: self.favourites,
            banner_image: self.banner_image,
            genres: self.genres,
            synonyms: self.synonyms,
            start_date: known_date(self.start_date),
            end_date: known_date(self.end_date),
            studios,
            characters,
            relations,
            site_url: self.site_url,
        }
    }

    fn take_summary(&mut self) -> MediaSummary {
        MediaSummary {
            id: self.id,
            title: self.title.take().map(Title::from).unwrap_or_default(),
            media_type: self.media_type.take(),
            format: self.format.take(),
            status: self.status.take(),
            season: self.season.take(),
            season_year: self.season_year,
            average_score: self.average_score,
            popularity: self.popularity,
            cover_image: self.cover_image.take().map(|c| CoverImage {
                extra_large: c.extra_large,
                large: c.large,
                medium: c.medium,
            }),
        }
    }
}

// ── Characters ───────────────────────────────────────────────────

/// Voice actors across all media edges, first occurrence of each id kept.
fn collect_voice_actors(edges: &mut [CharacterMediaEdge]) -> Vec<VoiceActor> {
    let mut seen = HashSet::new();
    let mut actors = Vec::new();
    for edge in edges {
        for actor in edge.voice_actors.drain(..) {
            let Some(id) = actor.id else { continue };
            if !seen.insert(id) {
                continue;
            }
            actors.push(VoiceActor {
                id,
                name: full_name(actor.name.as_ref()),
                name_native: actor.name.and_then(|n| n.native),
                image: large_image(actor.image),
                language: actor.language,
            });
        }
    }
    actors
}

impl AniListCharacter {
    pub fn into_profile(self) -> CharacterProfile {
        let connection = self.media.unwrap_or_default();
        let mut edges = connection.edges;
        let voice_actors = collect_voice_actors(&mut edges);

        let media: Vec<MediaSummary> = if edges.is_empty() {
            connection.nodes.into_iter().map(AniListMedia::into_summary).collect()
        } else {
            edges
                .into_iter()
                .filter_map(|edge| edge.node)
                .map(AniListMedia::into_summary)
                .collect()
        };

        let name = self.name.unwrap_or_default();
        CharacterProfile {
            id: self.id,
            name_full: full_name(Some(&name)),
            name_native: name.native,
            name_alternative: name.alternative,
            image_large: large_image(self.image),
            description: self.description,
            favourites: self.favourites,
            age: self.age,
            gender: self.gender,
            blood_type: self.blood_type,
            date_of_birth: known_date(self.date_of_birth),
            media: media.into_iter().take(CHARACTER_MEDIA_LIMIT).collect(),
            voice_actors,
        }
    }

    /// Whether the character's date of birth falls on `month`/`day`.
    ///
    /// The year is ignored; a missing month or day never matches.
    pub fn has_birthday_on(&self, month: u32, day: u32) -> bool {
        self.date_of_birth
            .is_some_and(|dob| dob.month == Some(month) && dob.day == Some(day))
    }

    pub fn into_birthday_entry(self) -> BirthdayEntry {
        let connection = self.media.unwrap_or_default();
        let first_title = connection
            .nodes
            .into_iter()
            .next()
            .or_else(|| connection.edges.into_iter().find_map(|e| e.node))
            .and_then(|m| m.title)
            .unwrap_or_default();

        BirthdayEntry {
            id: self.id,
            name_full: full_name(self.name.as_ref()),
            name_native: self.name.and_then(|n| n.native),
            image_large: large_image(self.image),
            favourites: self.favourites,
            anime_title_romaji: first_title.romaji,
            anime_title_english: first_title.english,
        }
    }
}

// ── Staff ────────────────────────────────────────────────────────

impl AniListStaff {
    pub fn into_profile(self) -> StaffProfile {
        let works = self.staff_media.unwrap_or_default();
        let page_info = works.page_info.unwrap_or_default();
        let name = self.name.unwrap_or_default();

        StaffProfile {
            id: self.id,
            name_full: full_name(Some(&name)),
            name_native: name.native,
            name_alternative: name.alternative,
            image_large: large_image(self.image),
            description: self.description,
            primary_occupations: self.primary_occupations,
            gender: self.gender,
            date_of_birth: known_date(self.date_of_birth),
            date_of_death: known_date(self.date_of_death),
            age: self.age,
            years_active: self.years_active,
            home_town: self.home_town,
            blood_type: self.blood_type,
            favourites: self.favourites,
            site_url: self.site_url,
            works: works.nodes.into_iter().map(AniListMedia::into_summary).collect(),
            works_total: page_info.total.unwrap_or(0),
            works_has_next: page_info.has_next_page.unwrap_or(false),
        }
    }
}

// ── Users ────────────────────────────────────────────────────────

impl From<UserAnimeStatistics> for AnimeStatistics {
    fn from(s: UserAnimeStatistics) -> Self {
        Self {
            count: s.count,
            mean_score: s.mean_score,
            minutes_watched: s.minutes_watched,
            episodes_watched: s.episodes_watched,
        }
    }
}

impl From<UserMangaStatistics> for MangaStatistics {
    fn from(s: UserMangaStatistics) -> Self {
        Self {
            count: s.count,
            mean_score: s.mean_score,
            chapters_read: s.chapters_read,
            volumes_read: s.volumes_read,
        }
    }
}

impl AniListUser {
    pub fn into_profile(self) -> UserProfile {
        let favourites = self.favourites.unwrap_or_default();
        let media = |conn: Option<MediaConnection>| -> Vec<MediaSummary> {
            conn.map(|c| c.nodes)
                .unwrap_or_default()
                .into_iter()
                .map(AniListMedia::into_summary)
                .collect()
        };
        let people = |conn: Option<CharacterConnection>| -> Vec<PersonSummary> {
            conn.map(|c| c.nodes)
                .unwrap_or_default()
                .into_iter()
                .filter_map(PersonNode::into_summary)
                .collect()
        };

        UserProfile {
            id: self.id,
            name: self
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| NAME_PLACEHOLDER.to_string()),
            avatar: self
                .avatar
                .map(|a| Avatar {
                    large: a.large,
                    medium: a.medium,
                })
                .unwrap_or_default(),
            banner_image: self.banner_image,
            about: self.about,
            statistics: self.statistics.map(|s| UserStatistics {
                anime: s.anime.map(AnimeStatistics::from),
                manga: s.manga.map(MangaStatistics::from),
            }),
            favourites: UserFavourites {
                anime: media(favourites.anime),
                manga: media(favourites.manga),
                characters: people(favourites.characters),
                staff: people(favourites.staff),
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
            site_url: self.site_url,
            donator_tier: self.donator_tier,
            moderator_roles: self.moderator_roles,
        }
    }
}
