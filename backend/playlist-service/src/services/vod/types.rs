/// Wire types for the upstream VOD OpenAPI
///
/// Response shapes follow the upstream PascalCase JSON. Every field is
/// optional with a default so sparse upstream payloads deserialize cleanly;
/// the aggregation core decides what is actually required.
use serde::{Deserialize, Serialize};

// ========================================
// Responses
// ========================================

/// GetPlaylist response body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PlaylistDetail {
    pub request_id: Option<String>,
    pub playlist_id: Option<String>,
    pub playlist_name: Option<String>,
    pub playlist_description: Option<String>,
    pub playlist_status: Option<String>,
    pub playlist_tags: Option<String>,
    pub playlist_cover_url: Option<String>,
    pub playlist_order_by: Option<String>,
    pub playlist_extension: Option<String>,
    pub create_time: Option<String>,
    pub modify_time: Option<String>,
    pub total: Option<i64>,
    pub playlist_videos: Vec<PlaylistItem>,
}

/// One member of a playlist in the GetPlaylist response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PlaylistItem {
    pub playlist_id: Option<String>,
    pub video_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub cover_url: Option<String>,
}

/// One entry of the GetPlaylists response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PlaylistSummary {
    pub playlist_id: Option<String>,
    pub playlist_name: Option<String>,
    pub playlist_describe: Option<String>,
    pub playlist_status: Option<String>,
    pub playlist_tags: Option<String>,
    pub playlist_cover_url: Option<String>,
    pub playlist_order_by: Option<String>,
    pub playlist_extension: Option<String>,
    pub create_time: Option<String>,
    pub modify_time: Option<String>,
}

/// GetPlaylists response body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PlaylistPage {
    pub request_id: Option<String>,
    pub playlists: Vec<PlaylistSummary>,
    pub total: Option<i64>,
}

/// One image record from GetImageInfos
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ImageInfo {
    pub image_id: Option<String>,
    #[serde(rename = "URL")]
    pub url: Option<String>,
}

/// GetImageInfos response body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GetImageInfosResponse {
    pub request_id: Option<String>,
    pub image_info: Vec<ImageInfo>,
}

/// One video record from GetVideoInfos
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct VideoInfo {
    pub video_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "CoverURL")]
    pub cover_url: Option<String>,
}

/// GetVideoInfos response body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GetVideoInfosResponse {
    pub request_id: Option<String>,
    pub video_list: Vec<VideoInfo>,
}

/// GetAppPlayKey response body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GetAppPlayKeyResponse {
    pub request_id: Option<String>,
    pub app_play_key: Option<AppPlayKey>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AppPlayKey {
    pub app_id: Option<String>,
    pub play_key: Option<String>,
}

// ========================================
// Passthrough Requests
// ========================================

/// CreatePlaylist request body accepted from clients
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlaylistRequest {
    pub playlist_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_describe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_cover_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_extension: Option<String>,
    /// Comma-joined initial member video ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_ids: Option<String>,
}

/// DeletePlaylists request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePlaylistsRequest {
    /// Comma-joined playlist ids
    pub playlist_ids: String,
    /// Delete playlists that still contain videos
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_delete: Option<bool>,
}

/// UpdatePlaylistBasicInfo request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlaylistBasicInfoRequest {
    pub playlist_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_describe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_cover_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_extension: Option<String>,
}

/// UpdatePlaylistVideoBasicInfo request body.
///
/// Overrides how one member video displays inside a playlist (title,
/// description, cover) without touching the underlying video, and can swap
/// the member for another video via `new_video_id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlaylistVideoBasicInfoRequest {
    pub playlist_id: String,
    pub original_video_id: String,
    /// Replacement video id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_video_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
}

/// Request body shared by the playlist membership operations
/// (UpdatePlaylistVideos / AddPlaylistVideos / DeletePlaylistVideos)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistVideosRequest {
    pub playlist_id: String,
    /// Comma-joined video ids
    pub video_ids: String,
}
