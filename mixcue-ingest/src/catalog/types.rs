//! Wire types for the remote catalog service
//!
//! The service wraps everything in `data` arrays and camelCases attribute
//! names. Only the fields mixcue reads are modeled; unknown fields are
//! ignored by serde.

use mixcue_common::model::Song;
use serde::{Deserialize, Serialize};

/// Name of the catalog's root genre. Every top-level genre is parented
/// directly under it; the root itself carries no useful signal.
pub const ROOT_GENRE: &str = "Music";

/// One page of the user's library song listing
#[derive(Debug, Deserialize)]
pub struct LibraryPage {
    #[serde(default)]
    pub data: Vec<LibraryEntry>,
    /// Continuation link; present while more pages remain
    #[serde(default)]
    pub next: Option<String>,
}

/// One entry of the library listing — only the identifier matters here
#[derive(Debug, Deserialize)]
pub struct LibraryEntry {
    pub id: String,
}

/// Response of a batched catalog song detail request
#[derive(Debug, Deserialize)]
pub struct DetailResponse {
    #[serde(default)]
    pub data: Vec<SongResource>,
}

/// A catalog song resource with its genre relationships
#[derive(Debug, Deserialize)]
pub struct SongResource {
    pub id: String,
    pub attributes: SongAttributes,
    #[serde(default)]
    pub relationships: Option<SongRelationships>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongAttributes {
    pub name: String,
    pub artist_name: String,
    #[serde(default)]
    pub genre_names: Vec<String>,
    #[serde(default)]
    pub previews: Vec<Preview>,
    #[serde(default)]
    pub artwork: Option<Artwork>,
}

#[derive(Debug, Deserialize)]
pub struct Preview {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct Artwork {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct SongRelationships {
    #[serde(default)]
    pub genres: Option<GenreRelationship>,
}

#[derive(Debug, Deserialize)]
pub struct GenreRelationship {
    #[serde(default)]
    pub data: Vec<GenreResource>,
}

/// A genre resource related to a song
#[derive(Debug, Deserialize)]
pub struct GenreResource {
    pub id: String,
    #[serde(default)]
    pub attributes: Option<GenreAttributes>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreAttributes {
    pub name: String,
    #[serde(default)]
    pub parent_name: Option<String>,
}

/// A genre name together with its catalog id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreRef {
    pub id: String,
    pub name: String,
}

/// One of the user's existing remote playlists
#[derive(Debug, Clone, Deserialize)]
pub struct RemotePlaylist {
    pub id: String,
    pub name: String,
}

/// A fully fetched song record, ready for aggregation
///
/// `genres` are the song's top-level genre refs (feed the genre
/// dictionary); `subgenres` are the specific genre names (feed the
/// subgenre dictionary and the song's filterable terms).
#[derive(Debug, Clone)]
pub struct SongDetail {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub genre_names: Vec<String>,
    pub genres: Vec<GenreRef>,
    pub subgenres: Vec<String>,
    pub preview_url: Option<String>,
    pub artwork_url: Option<String>,
}

impl SongDetail {
    pub fn into_song(self) -> Song {
        Song {
            id: self.id,
            name: self.name,
            artist: self.artist,
            genre_names: self.genre_names,
            subgenre_names: self.subgenres,
            preview_url: self.preview_url,
            artwork_url: self.artwork_url,
        }
    }
}

impl From<SongResource> for SongDetail {
    fn from(resource: SongResource) -> Self {
        let mut genres = Vec::new();
        let mut subgenres = Vec::new();

        let related = resource
            .relationships
            .and_then(|r| r.genres)
            .map(|g| g.data)
            .unwrap_or_default();

        for genre in related {
            let Some(attributes) = genre.attributes else {
                continue;
            };
            if attributes.name == ROOT_GENRE {
                continue;
            }
            match attributes.parent_name.as_deref() {
                // parented at the root (or unparented): a top-level genre
                None | Some(ROOT_GENRE) => genres.push(GenreRef {
                    id: genre.id,
                    name: attributes.name,
                }),
                // anything deeper is a subgenre
                Some(_) => subgenres.push(attributes.name),
            }
        }

        Self {
            id: resource.id,
            name: resource.attributes.name,
            artist: resource.attributes.artist_name,
            genre_names: resource.attributes.genre_names,
            genres,
            subgenres,
            preview_url: resource.attributes.previews.into_iter().next().map(|p| p.url),
            artwork_url: resource.attributes.artwork.map(|a| a.url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail_from_json(json: &str) -> SongDetail {
        let resource: SongResource = serde_json::from_str(json).unwrap();
        resource.into()
    }

    #[test]
    fn splits_relationships_into_genres_and_subgenres() {
        let detail = detail_from_json(
            r#"{
                "id": "s1",
                "attributes": {
                    "name": "Example Song",
                    "artistName": "Example Artist",
                    "genreNames": ["Rock", "Music"],
                    "previews": [{"url": "https://example.invalid/p.m4a"}],
                    "artwork": {"url": "https://example.invalid/a.jpg"}
                },
                "relationships": {
                    "genres": {
                        "data": [
                            {"id": "g-root", "attributes": {"name": "Music"}},
                            {"id": "g-rock", "attributes": {"name": "Rock", "parentName": "Music"}},
                            {"id": "g-indie", "attributes": {"name": "Indie Rock", "parentName": "Rock"}}
                        ]
                    }
                }
            }"#,
        );

        assert_eq!(detail.genres, vec![GenreRef { id: "g-rock".into(), name: "Rock".into() }]);
        assert_eq!(detail.subgenres, vec!["Indie Rock"]);
        assert_eq!(detail.preview_url.as_deref(), Some("https://example.invalid/p.m4a"));
    }

    #[test]
    fn tolerates_missing_relationships_and_optional_fields() {
        let detail = detail_from_json(
            r#"{
                "id": "s2",
                "attributes": {"name": "Bare Song", "artistName": "Someone"}
            }"#,
        );

        assert!(detail.genres.is_empty());
        assert!(detail.subgenres.is_empty());
        assert!(detail.preview_url.is_none());
        assert!(detail.artwork_url.is_none());

        let song = detail.into_song();
        assert_eq!(song.id, "s2");
        assert!(song.subgenre_names.is_empty());
    }
}
