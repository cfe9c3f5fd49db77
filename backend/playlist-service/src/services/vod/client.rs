/// HTTP client for the upstream VOD OpenAPI
///
/// Remote-call adapter only: marshals RPC requests (common parameters plus
/// HMAC-SHA1 signature), decodes JSON responses, and maps API errors. No
/// business logic lives here.
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use crate::config::VodConfig;
use crate::error::{AppError, Result};
use crate::models::PageRequest;

use super::signature;
use super::types::{
    CreatePlaylistRequest, DeletePlaylistsRequest, GetAppPlayKeyResponse, GetImageInfosResponse,
    GetVideoInfosResponse, ImageInfo, PlaylistDetail, PlaylistPage, PlaylistVideosRequest,
    UpdatePlaylistBasicInfoRequest, UpdatePlaylistVideoBasicInfoRequest, VideoInfo,
};
use super::VodGateway;

/// Outcome of one RPC call before mapping to the service error model.
enum RpcFailure {
    /// The API answered with an error code/message pair
    Api { code: String, message: String },
    /// The request never produced a decodable API response
    Transport(String),
}

impl RpcFailure {
    fn into_app_error(self, action: &str) -> AppError {
        match self {
            RpcFailure::Api { code, message } => {
                AppError::Upstream(format!("{} failed: {} ({})", action, message, code))
            }
            RpcFailure::Transport(message) => {
                AppError::Upstream(format!("{} request failed: {}", action, message))
            }
        }
    }

    fn is_not_found(&self) -> bool {
        matches!(self, RpcFailure::Api { code, .. } if code.ends_with(".NotFound"))
    }
}

/// VOD OpenAPI client
#[derive(Clone)]
pub struct VodClient {
    http: Client,
    config: VodConfig,
}

impl VodClient {
    pub fn new(config: VodConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Issue one signed RPC call and return the raw JSON body.
    async fn invoke(
        &self,
        action: &str,
        business_params: Vec<(String, String)>,
    ) -> std::result::Result<Value, RpcFailure> {
        let mut params = business_params;
        params.push(("Action".to_string(), action.to_string()));
        params.push(("Format".to_string(), "JSON".to_string()));
        params.push(("Version".to_string(), self.config.api_version.clone()));
        params.push((
            "AccessKeyId".to_string(),
            self.config.access_key_id.clone(),
        ));
        params.push(("SignatureMethod".to_string(), "HMAC-SHA1".to_string()));
        params.push(("SignatureVersion".to_string(), "1.0".to_string()));
        params.push((
            "SignatureNonce".to_string(),
            Uuid::new_v4().to_string(),
        ));
        params.push((
            "Timestamp".to_string(),
            Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        ));

        let signed = signature::sign_request("GET", &params, &self.config.access_key_secret)
            .map_err(|e| RpcFailure::Transport(e.to_string()))?;
        params.push(("Signature".to_string(), signed));

        debug!(action, endpoint = %self.config.endpoint, "calling VOD OpenAPI");

        // The query string is built with the exact encoding the signature
        // was computed over.
        let url = format!(
            "{}/?{}",
            self.config.endpoint.trim_end_matches('/'),
            signature::encoded_query(&params)
        );

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| RpcFailure::Transport(e.to_string()))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| RpcFailure::Transport(format!("undecodable response: {}", e)))?;

        if !status.is_success() {
            return Err(RpcFailure::Api {
                code: body
                    .get("Code")
                    .and_then(Value::as_str)
                    .unwrap_or("Unknown")
                    .to_string(),
                message: body
                    .get("Message")
                    .and_then(Value::as_str)
                    .unwrap_or("no error message")
                    .to_string(),
            });
        }

        Ok(body)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        action: &str,
        params: Vec<(String, String)>,
    ) -> Result<T> {
        let body = self
            .invoke(action, params)
            .await
            .map_err(|failure| failure.into_app_error(action))?;

        serde_json::from_value(body).map_err(|e| {
            AppError::Upstream(format!("{} returned an unexpected shape: {}", action, e))
        })
    }

    /// Passthrough call returning the upstream JSON unchanged.
    async fn call_raw(&self, action: &str, params: Vec<(String, String)>) -> Result<Value> {
        self.invoke(action, params)
            .await
            .map_err(|failure| failure.into_app_error(action))
    }

    // ========================================
    // Passthrough operations
    // ========================================

    pub async fn create_playlist(&self, request: &CreatePlaylistRequest) -> Result<Value> {
        let mut params = vec![("PlaylistName".to_string(), request.playlist_name.clone())];
        push_opt(&mut params, "PlaylistDescribe", &request.playlist_describe);
        push_opt(&mut params, "PlaylistCoverUrl", &request.playlist_cover_url);
        push_opt(&mut params, "PlaylistTags", &request.playlist_tags);
        push_opt(&mut params, "PlaylistExtension", &request.playlist_extension);
        push_opt(&mut params, "VideoIds", &request.video_ids);
        self.call_raw("CreatePlaylist", params).await
    }

    pub async fn delete_playlists(&self, request: &DeletePlaylistsRequest) -> Result<Value> {
        let mut params = vec![("PlaylistIds".to_string(), request.playlist_ids.clone())];
        if let Some(force) = request.force_delete {
            params.push(("ForceDelete".to_string(), force.to_string()));
        }
        self.call_raw("DeletePlaylists", params).await
    }

    pub async fn update_playlist_basic_info(
        &self,
        request: &UpdatePlaylistBasicInfoRequest,
    ) -> Result<Value> {
        let mut params = vec![("PlaylistId".to_string(), request.playlist_id.clone())];
        push_opt(&mut params, "PlaylistName", &request.playlist_name);
        push_opt(&mut params, "PlaylistDescribe", &request.playlist_describe);
        push_opt(&mut params, "PlaylistCoverUrl", &request.playlist_cover_url);
        push_opt(&mut params, "PlaylistTags", &request.playlist_tags);
        push_opt(&mut params, "PlaylistExtension", &request.playlist_extension);
        self.call_raw("UpdatePlaylistBasicInfo", params).await
    }

    pub async fn update_playlist_video_basic_info(
        &self,
        request: &UpdatePlaylistVideoBasicInfoRequest,
    ) -> Result<Value> {
        self.call_raw(
            "UpdatePlaylistVideoBasicInfo",
            video_basic_info_params(request),
        )
        .await
    }

    pub async fn update_playlist_videos(&self, request: &PlaylistVideosRequest) -> Result<Value> {
        self.call_raw("UpdatePlaylistVideos", membership_params(request))
            .await
    }

    pub async fn add_playlist_videos(&self, request: &PlaylistVideosRequest) -> Result<Value> {
        self.call_raw("AddPlaylistVideos", membership_params(request))
            .await
    }

    pub async fn delete_playlist_videos(&self, request: &PlaylistVideosRequest) -> Result<Value> {
        self.call_raw("DeletePlaylistVideos", membership_params(request))
            .await
    }
}

fn video_basic_info_params(
    request: &UpdatePlaylistVideoBasicInfoRequest,
) -> Vec<(String, String)> {
    let mut params = vec![
        ("PlaylistId".to_string(), request.playlist_id.clone()),
        (
            "OriginalVideoId".to_string(),
            request.original_video_id.clone(),
        ),
    ];
    push_opt(&mut params, "NewVideoId", &request.new_video_id);
    push_opt(&mut params, "Title", &request.title);
    push_opt(&mut params, "Description", &request.description);
    push_opt(&mut params, "CoverUrl", &request.cover_url);
    params
}

fn membership_params(request: &PlaylistVideosRequest) -> Vec<(String, String)> {
    vec![
        ("PlaylistId".to_string(), request.playlist_id.clone()),
        ("VideoIds".to_string(), request.video_ids.clone()),
    ]
}

fn push_opt(params: &mut Vec<(String, String)>, name: &str, value: &Option<String>) {
    if let Some(value) = value {
        params.push((name.to_string(), value.clone()));
    }
}

#[async_trait]
impl VodGateway for VodClient {
    async fn get_playlist(&self, playlist_id: &str) -> Result<Option<PlaylistDetail>> {
        let params = vec![("PlaylistId".to_string(), playlist_id.to_string())];
        match self.invoke("GetPlaylist", params).await {
            Ok(body) => serde_json::from_value(body)
                .map(Some)
                .map_err(|e| {
                    AppError::Upstream(format!("GetPlaylist returned an unexpected shape: {}", e))
                }),
            Err(failure) if failure.is_not_found() => Ok(None),
            Err(failure) => Err(failure.into_app_error("GetPlaylist")),
        }
    }

    async fn list_playlists(&self, page: &PageRequest) -> Result<PlaylistPage> {
        let mut params = Vec::new();
        if let Some(page_no) = page.page_no {
            params.push(("PageNo".to_string(), page_no.to_string()));
        }
        if let Some(page_size) = page.page_size {
            params.push(("PageSize".to_string(), page_size.to_string()));
        }
        if let Some(sort_by) = &page.sort_by {
            params.push(("SortBy".to_string(), sort_by.clone()));
        }
        self.call("GetPlaylists", params).await
    }

    async fn get_image_infos(&self, image_ids: &str) -> Result<Vec<ImageInfo>> {
        let params = vec![("ImageIds".to_string(), image_ids.to_string())];
        let response: GetImageInfosResponse = self.call("GetImageInfos", params).await?;
        Ok(response.image_info)
    }

    async fn get_video_infos(&self, video_ids: &str) -> Result<Vec<VideoInfo>> {
        let params = vec![("VideoIds".to_string(), video_ids.to_string())];
        let response: GetVideoInfosResponse = self.call("GetVideoInfos", params).await?;
        Ok(response.video_list)
    }

    async fn get_app_play_key(&self, app_id: &str) -> Result<Option<String>> {
        let params = vec![("AppId".to_string(), app_id.to_string())];
        let response: GetAppPlayKeyResponse = self.call("GetAppPlayKey", params).await?;
        Ok(response.app_play_key.and_then(|key| key.play_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_basic_info_params_carry_required_and_set_fields_only() {
        let request = UpdatePlaylistVideoBasicInfoRequest {
            playlist_id: "pl-1".to_string(),
            original_video_id: "vid-old".to_string(),
            new_video_id: Some("vid-new".to_string()),
            title: Some("Updated title".to_string()),
            description: None,
            cover_url: None,
        };

        let params = video_basic_info_params(&request);
        assert_eq!(
            params,
            vec![
                ("PlaylistId".to_string(), "pl-1".to_string()),
                ("OriginalVideoId".to_string(), "vid-old".to_string()),
                ("NewVideoId".to_string(), "vid-new".to_string()),
                ("Title".to_string(), "Updated title".to_string()),
            ]
        );
    }

    #[test]
    fn video_basic_info_request_binds_camel_case_body() {
        let request: UpdatePlaylistVideoBasicInfoRequest = serde_json::from_str(
            r#"{"playlistId":"pl-1","originalVideoId":"vid-old","coverUrl":"https://cdn.example.com/c.jpg"}"#,
        )
        .unwrap();

        assert_eq!(request.playlist_id, "pl-1");
        assert_eq!(request.original_video_id, "vid-old");
        assert_eq!(request.new_video_id, None);
        assert_eq!(
            request.cover_url.as_deref(),
            Some("https://cdn.example.com/c.jpg")
        );
    }

    #[test]
    fn membership_params_join_playlist_and_video_ids() {
        let request = PlaylistVideosRequest {
            playlist_id: "pl-1".to_string(),
            video_ids: "vid-1,vid-2".to_string(),
        };

        assert_eq!(
            membership_params(&request),
            vec![
                ("PlaylistId".to_string(), "pl-1".to_string()),
                ("VideoIds".to_string(), "vid-1,vid-2".to_string()),
            ]
        );
    }
}
