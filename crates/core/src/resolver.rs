//! Extraction of video and playlist identifiers from YouTube URLs.
//!
//! Recognized video URL shapes:
//! - `https://youtu.be/VIDEO_ID`
//! - `https://www.youtube.com/v/VIDEO_ID`
//! - `https://www.youtube.com/u/1/VIDEO_ID`
//! - `https://www.youtube.com/embed/VIDEO_ID`
//! - `https://www.youtube.com/watch?v=VIDEO_ID`
//! - `https://www.youtube.com/watch?feature=share&v=VIDEO_ID`

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{EduError, Result};

/// Video ids are exactly this many characters long.
pub const VIDEO_ID_LEN: usize = 11;

// The greedy prefix makes the last marker in the URL win.
static VIDEO_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*(youtu.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*).*").expect("valid regex")
});

static PLAYLIST_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]list=([^&]+)").expect("valid regex"));

/// Extract the 11-character video id from a YouTube URL.
///
/// Returns `None` when no recognized marker is present or the candidate is not
/// a well-formed id.
pub fn extract_video_id(url: &str) -> Option<String> {
    let captures = VIDEO_ID_RE.captures(url.trim())?;
    let candidate = captures.get(2)?.as_str();

    if is_valid_video_id(candidate) {
        Some(candidate.to_string())
    } else {
        None
    }
}

/// Extract the `list=` query parameter verbatim.
pub fn extract_playlist_id(url: &str) -> Option<String> {
    PLAYLIST_ID_RE
        .captures(url.trim())
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

pub fn require_video_id(url: &str) -> Result<String> {
    extract_video_id(url).ok_or_else(|| EduError::InvalidUrl {
        url: url.to_string(),
    })
}

pub fn require_playlist_id(url: &str) -> Result<String> {
    extract_playlist_id(url).ok_or_else(|| EduError::InvalidPlaylistUrl {
        url: url.to_string(),
    })
}

pub fn is_valid_video_id(id: &str) -> bool {
    id.len() == VIDEO_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

pub fn embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{}", video_id)
}
