//! YouTube Data API v3 client for video metadata and playlist listings.

use std::collections::HashMap;

use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    config::YoutubeSettings,
    error::{EduError, Result},
    format::format_duration,
    types::{PlaylistItem, VideoMetadata},
};

/// Upper bound of playlist entries fetched; continuation pages are not followed.
pub const PLAYLIST_PAGE_SIZE: u32 = 50;

const THUMBNAIL_PREFERENCE: [&str; 3] = ["medium", "high", "default"];

#[derive(Clone)]
pub struct YoutubeClient {
    http: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct VideoSnippetItem {
    snippet: VideoMetadata,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistEntry {
    snippet: PlaylistSnippet,
    content_details: PlaylistContentDetails,
}

#[derive(Debug, Deserialize)]
struct PlaylistSnippet {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    position: u32,
    #[serde(default)]
    thumbnails: HashMap<String, Thumbnail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistContentDetails {
    video_id: String,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DurationEntry {
    id: String,
    content_details: DurationDetails,
}

#[derive(Debug, Deserialize)]
struct DurationDetails {
    duration: String,
}

impl YoutubeClient {
    pub fn new(settings: YoutubeSettings) -> Self {
        Self::with_client(Client::new(), settings)
    }

    pub fn with_client(http: Client, settings: YoutubeSettings) -> Self {
        Self {
            http,
            api_key: settings.api_key,
            base_url: settings.base_url,
        }
    }

    /// Fetch title, description, channel and publish date of one video.
    pub async fn video_metadata(&self, video_id: &str) -> Result<VideoMetadata> {
        info!(video_id, "fetching video metadata");

        let response: ListResponse<VideoSnippetItem> = self
            .http
            .get(format!("{}/videos", self.base_url))
            .query(&[("part", "snippet"), ("id", video_id), ("key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response
            .items
            .into_iter()
            .next()
            .map(|item| item.snippet)
            .ok_or_else(|| EduError::NotFound {
                what: "Video",
                id: video_id.to_string(),
            })
    }

    /// Fetch up to [`PLAYLIST_PAGE_SIZE`] playlist entries with their durations,
    /// ordered by playlist position.
    pub async fn playlist_items(&self, playlist_id: &str) -> Result<Vec<PlaylistItem>> {
        info!(playlist_id, "fetching playlist items");

        let page_size = PLAYLIST_PAGE_SIZE.to_string();
        let listing: ListResponse<PlaylistEntry> = self
            .http
            .get(format!("{}/playlistItems", self.base_url))
            .query(&[
                ("part", "snippet,contentDetails"),
                ("playlistId", playlist_id),
                ("maxResults", page_size.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if listing.items.is_empty() {
            return Err(EduError::NotFound {
                what: "Playlist",
                id: playlist_id.to_string(),
            });
        }

        let ids = listing
            .items
            .iter()
            .map(|entry| entry.content_details.video_id.as_str())
            .collect::<Vec<_>>()
            .join(",");

        let details: ListResponse<DurationEntry> = self
            .http
            .get(format!("{}/videos", self.base_url))
            .query(&[
                ("part", "contentDetails,snippet"),
                ("id", ids.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(join_durations(listing.items, details.items))
    }
}

/// Pair every listing entry with the duration record carrying the same video id.
fn join_durations(entries: Vec<PlaylistEntry>, details: Vec<DurationEntry>) -> Vec<PlaylistItem> {
    let durations: HashMap<String, String> = details
        .into_iter()
        .map(|d| (d.id, d.content_details.duration))
        .collect();

    let mut items = entries
        .into_iter()
        .map(|entry| {
            let id = entry.content_details.video_id;
            let duration = match durations.get(&id) {
                Some(iso) => format_duration(iso),
                None => {
                    warn!(video_id = %id, "no duration returned for playlist video");
                    format_duration("")
                }
            };
            let thumbnail_url = THUMBNAIL_PREFERENCE
                .iter()
                .find_map(|size| entry.snippet.thumbnails.get(*size))
                .map(|t| t.url.clone())
                .unwrap_or_default();

            PlaylistItem {
                id,
                title: entry.snippet.title,
                description: entry.snippet.description,
                thumbnail_url,
                duration,
                position: entry.snippet.position,
            }
        })
        .collect::<Vec<_>>();

    items.sort_by_key(|item| item.position);
    items
}
