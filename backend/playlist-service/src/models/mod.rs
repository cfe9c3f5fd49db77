/// Data models for playlist-service
///
/// This module defines:
/// - `CallResult`: the uniform response envelope for aggregated endpoints
/// - `Playlist` / `PlaylistVideoItem`: client-facing domain objects
/// - `PageRequest`: pagination parameters for playlist listing
///
/// Domain objects are constructed from upstream wire types via explicit
/// field mapping; they never embed or alias the upstream schema.
use serde::{Deserialize, Serialize};

use crate::error::result_codes;
use crate::services::vod::types::{PlaylistDetail, PlaylistItem, PlaylistSummary, VideoInfo};

// ========================================
// Response Envelope
// ========================================

/// Uniform business result envelope.
///
/// `code` is zero on success and a nonzero category code on failure; the
/// HTTP layer needs nothing beyond this contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallResult<T> {
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_code: Option<String>,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl<T> CallResult<T> {
    /// Success envelope carrying business data
    pub fn ok(data: T) -> Self {
        Self {
            code: result_codes::SUCCESS,
            http_code: Some("200".to_string()),
            success: true,
            message: "success".to_string(),
            data: Some(data),
            request_id: None,
        }
    }

    /// Success envelope with a custom message and no data
    pub fn ok_msg(message: impl Into<String>) -> Self {
        Self {
            code: result_codes::SUCCESS,
            http_code: Some("200".to_string()),
            success: true,
            message: message.into(),
            data: None,
            request_id: None,
        }
    }

    /// Failure envelope with a category code
    pub fn err(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            http_code: None,
            success: false,
            message: message.into(),
            data: None,
            request_id: None,
        }
    }
}

// ========================================
// Playlist Models
// ========================================

/// Playlist lifecycle status as reported by the VOD service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaylistStatus {
    Normal,
    Disabled,
}

impl PlaylistStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Disabled => "Disabled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Normal" => Some(Self::Normal),
            "Disabled" => Some(Self::Disabled),
            _ => None,
        }
    }
}

/// One video within a playlist context, either a full member or a
/// synthesized preview stand-in.
///
/// `play_auth` is attached after credential signing; an item without a
/// credential is still valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistVideoItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_id: Option<String>,
    pub video_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub play_auth: Option<String>,
}

impl PlaylistVideoItem {
    /// Build an item from a playlist member returned by the detail call
    pub fn from_playlist_item(item: &PlaylistItem) -> Self {
        Self {
            playlist_id: item.playlist_id.clone(),
            video_id: item.video_id.clone().unwrap_or_default(),
            title: item.title.clone(),
            description: item.description.clone(),
            cover_url: item.cover_url.clone(),
            play_auth: None,
        }
    }

    /// Build a preview item from standalone video metadata
    pub fn from_video(video: &VideoInfo) -> Self {
        Self {
            playlist_id: None,
            video_id: video.video_id.clone().unwrap_or_default(),
            title: video.title.clone(),
            description: video.description.clone(),
            cover_url: video.cover_url.clone(),
            play_auth: None,
        }
    }
}

/// Client-facing playlist resource.
///
/// `cover_url` starts as the upstream image id and is replaced in place with
/// the resolved URL during aggregation; when resolution yields nothing in
/// the detail flow it is cleared rather than left dangling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub playlist_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_describe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_status: Option<PlaylistStatus>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub playlist_tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_cover_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_order_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_extension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modify_time: Option<String>,
    /// Total item count, populated by the detail view only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub playlist_videos: Vec<PlaylistVideoItem>,
}

impl Playlist {
    /// Build a playlist from the detail response, videos not yet attached
    pub fn from_detail(detail: &PlaylistDetail) -> Self {
        Self {
            playlist_id: detail.playlist_id.clone().unwrap_or_default(),
            playlist_name: detail.playlist_name.clone(),
            playlist_describe: detail.playlist_description.clone(),
            playlist_status: parse_status(detail.playlist_status.as_deref()),
            playlist_tags: split_tags(detail.playlist_tags.as_deref()),
            playlist_cover_url: detail.playlist_cover_url.clone(),
            playlist_order_by: detail.playlist_order_by.clone(),
            playlist_extension: detail.playlist_extension.clone(),
            create_time: detail.create_time.clone(),
            modify_time: detail.modify_time.clone(),
            total: detail.total,
            playlist_videos: Vec::new(),
        }
    }

    /// Build a playlist from one entry of the listing response
    pub fn from_summary(summary: &PlaylistSummary) -> Self {
        Self {
            playlist_id: summary.playlist_id.clone().unwrap_or_default(),
            playlist_name: summary.playlist_name.clone(),
            playlist_describe: summary.playlist_describe.clone(),
            playlist_status: parse_status(summary.playlist_status.as_deref()),
            playlist_tags: split_tags(summary.playlist_tags.as_deref()),
            playlist_cover_url: summary.playlist_cover_url.clone(),
            playlist_order_by: summary.playlist_order_by.clone(),
            playlist_extension: summary.playlist_extension.clone(),
            create_time: summary.create_time.clone(),
            modify_time: summary.modify_time.clone(),
            total: None,
            playlist_videos: Vec::new(),
        }
    }
}

fn parse_status(raw: Option<&str>) -> Option<PlaylistStatus> {
    raw.and_then(PlaylistStatus::from_str)
}

/// Upstream reports tags as a comma-joined string; order is preserved.
fn split_tags(raw: Option<&str>) -> Vec<String> {
    raw.map(|tags| {
        tags.split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

// ========================================
// Requests
// ========================================

/// Pagination parameters for playlist listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_no: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
}
