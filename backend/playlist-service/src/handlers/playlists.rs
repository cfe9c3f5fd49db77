/// Playlist handlers - HTTP endpoints for playlist operations
///
/// Two families of endpoints:
/// - aggregated endpoints backed by `PlaylistService`, wrapped in the
///   uniform `CallResult` envelope
/// - passthrough endpoints that forward to the VOD OpenAPI; the write
///   operations return the upstream JSON unchanged, the two playlist reads
///   remap the response into the client-facing `Playlist` shape
///
/// Handlers do parameter binding and routing only; no business logic.
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::Result;
use crate::models::{CallResult, PageRequest};
use crate::services::vod::types::{
    CreatePlaylistRequest, DeletePlaylistsRequest, PlaylistVideosRequest,
    UpdatePlaylistBasicInfoRequest, UpdatePlaylistVideoBasicInfoRequest,
};
use crate::services::vod::VodGateway;
use crate::services::{PlaylistService, VodClient};

#[derive(Debug, Deserialize)]
pub struct PlaylistInfoQuery {
    #[serde(rename = "playListId")]
    pub play_list_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistIdQuery {
    #[serde(rename = "playlistId")]
    pub playlist_id: String,
}

// ========================================
// Aggregated endpoints
// ========================================

/// Playlist detail enriched with cover URL and per-video play credentials
pub async fn get_playlist_info(
    service: web::Data<Arc<PlaylistService>>,
    query: web::Query<PlaylistInfoQuery>,
) -> Result<HttpResponse> {
    let playlist = service
        .get_playlist_detail(query.play_list_id.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(CallResult::ok(playlist)))
}

/// Playlist listing, each entry carrying its preview video and credential
pub async fn get_playlist_videos(
    service: web::Data<Arc<PlaylistService>>,
    request: web::Json<PageRequest>,
) -> Result<HttpResponse> {
    let playlists = service.get_playlist_list(&request).await?;
    Ok(HttpResponse::Ok().json(CallResult::ok(playlists)))
}

// ========================================
// Passthrough endpoints
// ========================================

/// GetPlaylist forwarded upstream, remapped to the client-facing playlist
/// shape. A missing playlist answers `null` rather than an error.
pub async fn get_playlist(
    client: web::Data<Arc<VodClient>>,
    query: web::Query<PlaylistIdQuery>,
) -> Result<HttpResponse> {
    let detail = client.get_playlist(&query.playlist_id).await?;
    let playlist = detail.map(|detail| crate::models::Playlist::from_detail(&detail));
    Ok(HttpResponse::Ok().json(playlist))
}

/// GetPlaylists forwarded upstream, each entry remapped to the client-facing
/// playlist shape (no enrichment, no envelope)
pub async fn get_playlists(
    client: web::Data<Arc<VodClient>>,
    request: web::Json<PageRequest>,
) -> Result<HttpResponse> {
    let page = client.list_playlists(&request).await?;
    let playlists: Vec<crate::models::Playlist> = page
        .playlists
        .iter()
        .map(crate::models::Playlist::from_summary)
        .collect();
    Ok(HttpResponse::Ok().json(playlists))
}

pub async fn create_playlist(
    client: web::Data<Arc<VodClient>>,
    request: web::Json<CreatePlaylistRequest>,
) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(client.create_playlist(&request).await?))
}

pub async fn delete_playlists(
    client: web::Data<Arc<VodClient>>,
    request: web::Json<DeletePlaylistsRequest>,
) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(client.delete_playlists(&request).await?))
}

pub async fn update_playlist_basic_info(
    client: web::Data<Arc<VodClient>>,
    request: web::Json<UpdatePlaylistBasicInfoRequest>,
) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(client.update_playlist_basic_info(&request).await?))
}

pub async fn update_playlist_video_basic_info(
    client: web::Data<Arc<VodClient>>,
    request: web::Json<UpdatePlaylistVideoBasicInfoRequest>,
) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(client.update_playlist_video_basic_info(&request).await?))
}

pub async fn update_playlist_videos(
    client: web::Data<Arc<VodClient>>,
    request: web::Json<PlaylistVideosRequest>,
) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(client.update_playlist_videos(&request).await?))
}

pub async fn add_playlist_videos(
    client: web::Data<Arc<VodClient>>,
    request: web::Json<PlaylistVideosRequest>,
) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(client.add_playlist_videos(&request).await?))
}

pub async fn delete_playlist_videos(
    client: web::Data<Arc<VodClient>>,
    request: web::Json<PlaylistVideosRequest>,
) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(client.delete_playlist_videos(&request).await?))
}
