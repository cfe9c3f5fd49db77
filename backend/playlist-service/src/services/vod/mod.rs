/// Upstream VOD gateway
///
/// `VodGateway` is the seam the aggregation core depends on; `VodClient` is
/// the concrete HTTP implementation against the VOD OpenAPI.
pub mod client;
pub mod signature;
pub mod types;

use async_trait::async_trait;

use crate::error::Result;
use types::{ImageInfo, PlaylistDetail, PlaylistPage, VideoInfo};

use crate::models::PageRequest;

pub use client::VodClient;

/// Operations the aggregation core consumes from the upstream VOD service.
///
/// Id-list arguments are comma-joined, matching the upstream batch APIs.
#[async_trait]
pub trait VodGateway: Send + Sync {
    /// Fetch one playlist with its member videos; `None` when the playlist
    /// does not exist upstream.
    async fn get_playlist(&self, playlist_id: &str) -> Result<Option<PlaylistDetail>>;

    /// Page through playlists.
    async fn list_playlists(&self, page: &PageRequest) -> Result<PlaylistPage>;

    /// Batch-resolve image ids to image records.
    async fn get_image_infos(&self, image_ids: &str) -> Result<Vec<ImageInfo>>;

    /// Batch-fetch video metadata.
    async fn get_video_infos(&self, video_ids: &str) -> Result<Vec<VideoInfo>>;

    /// Fetch the play key for a VOD application; `None` when the upstream
    /// response carries no key.
    async fn get_app_play_key(&self, app_id: &str) -> Result<Option<String>>;
}
