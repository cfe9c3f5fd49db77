/// Playlist aggregation service
///
/// Orchestrates the upstream VOD calls, the play key cache, and credential
/// signing into the two client-facing operations: playlist detail and
/// playlist listing. Required dependencies (playlist fetch, play key) abort
/// the operation on failure; enrichments (cover resolution, extension
/// parsing, a single item's credential) are best-effort and logged only.
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures::future::join_all;
use serde_json::Value;
use tracing::warn;

use crate::cache::PlayKeyCache;
use crate::error::{AppError, Result};
use crate::models::{PageRequest, Playlist, PlaylistVideoItem};
use crate::services::vod::VodGateway;

pub struct PlaylistService {
    gateway: Arc<dyn VodGateway>,
    play_keys: Arc<PlayKeyCache>,
    app_id: String,
    region: String,
}

impl PlaylistService {
    pub fn new(
        gateway: Arc<dyn VodGateway>,
        play_keys: Arc<PlayKeyCache>,
        app_id: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            play_keys,
            app_id: app_id.into(),
            region: region.into(),
        }
    }

    /// Fetch one playlist with resolved cover and per-video playback
    /// credentials. An empty `playlist_id` selects the first playlist of
    /// the default listing page.
    pub async fn get_playlist_detail(&self, playlist_id: Option<&str>) -> Result<Playlist> {
        let playlist_id = match playlist_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => id.to_string(),
            None => self.first_playlist_id().await?,
        };

        // The playlist itself and the play key are both hard dependencies.
        let (detail, play_key) = {
            let (detail, play_key) = tokio::join!(
                self.gateway.get_playlist(&playlist_id),
                self.play_keys.get_play_key(&self.app_id)
            );
            (detail?, play_key?)
        };

        let detail = detail
            .filter(|d| d.playlist_id.as_deref().is_some_and(|id| !id.is_empty()))
            .ok_or_else(|| AppError::NotFound("playlist not found".to_string()))?;

        let mut playlist = Playlist::from_detail(&detail);

        // Cover resolution runs alongside item signing. The outer None means
        // "leave the cover as it is" (skipped or failed); Some carries the
        // replacement value, which may itself be empty.
        let cover_id = playlist
            .playlist_cover_url
            .clone()
            .filter(|id| !id.trim().is_empty());
        let cover_fut = async {
            let image_id = cover_id?;
            match self.gateway.get_image_infos(&image_id).await {
                Ok(images) => Some(images.into_iter().next().and_then(|image| image.url)),
                Err(err) => {
                    warn!(error = %err, %image_id, "cover resolution failed, keeping prior value");
                    None
                }
            }
        };

        let items_fut = async {
            if detail.playlist_videos.is_empty() {
                return Ok::<_, AppError>(Vec::new());
            }
            let play_key = play_key
                .as_deref()
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .ok_or_else(|| AppError::InvalidState("play key is empty".to_string()))?;

            // Items are enriched independently; join_all keeps the output
            // aligned with the upstream member order.
            let items = join_all(detail.playlist_videos.iter().map(|member| async move {
                let mut item = PlaylistVideoItem::from_playlist_item(member);
                let video_id = item.video_id.trim();
                if !video_id.is_empty() {
                    match playback_token::sign(video_id, play_key, &self.region) {
                        Ok(token) => item.play_auth = Some(token),
                        Err(err) => {
                            warn!(error = %err, video_id, "credential signing failed for item")
                        }
                    }
                }
                item
            }))
            .await;
            Ok(items)
        };

        let (cover, items) = tokio::join!(cover_fut, items_fut);
        playlist.playlist_videos = items?;
        if let Some(resolved) = cover {
            playlist.playlist_cover_url = resolved;
        }

        Ok(playlist)
    }

    /// Page through playlists, each enriched with its resolved cover and a
    /// signed preview video item when the playlist extension names one.
    pub async fn get_playlist_list(&self, page: &PageRequest) -> Result<Vec<Playlist>> {
        let page_response = self.gateway.list_playlists(page).await?;
        if page_response.playlists.is_empty() {
            return Err(AppError::NotFound("playlist list is empty".to_string()));
        }

        // List enrichment cannot proceed without the play key.
        let play_key = self
            .play_keys
            .get_play_key(&self.app_id)
            .await?
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| AppError::InvalidState("play key is empty".to_string()))?;

        let mut playlists = Vec::with_capacity(page_response.playlists.len());
        let mut preview_by_playlist: HashMap<String, String> = HashMap::new();
        for summary in &page_response.playlists {
            let playlist = Playlist::from_summary(summary);
            if !playlist.playlist_id.is_empty() {
                if let Some(preview_id) =
                    extract_preview_video_id(playlist.playlist_extension.as_deref())
                {
                    preview_by_playlist.insert(playlist.playlist_id.clone(), preview_id);
                }
            }
            playlists.push(playlist);
        }

        let cover_ids: Vec<String> = playlists
            .iter()
            .filter_map(|playlist| playlist.playlist_cover_url.clone())
            .filter(|id| !id.trim().is_empty())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let preview_ids: Vec<String> = preview_by_playlist
            .values()
            .cloned()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        // Batch lookups run in parallel; either failing degrades to an empty
        // mapping rather than failing the listing.
        let images_fut = async {
            if cover_ids.is_empty() {
                return HashMap::new();
            }
            match self.gateway.get_image_infos(&cover_ids.join(",")).await {
                Ok(images) => images
                    .into_iter()
                    .filter_map(|image| Some((image.image_id?, image.url?)))
                    .collect(),
                Err(err) => {
                    warn!(error = %err, "batch cover resolution failed");
                    HashMap::new()
                }
            }
        };
        let videos_fut = async {
            if preview_ids.is_empty() {
                return HashMap::new();
            }
            match self.gateway.get_video_infos(&preview_ids.join(",")).await {
                Ok(videos) => videos
                    .into_iter()
                    .filter_map(|video| Some((video.video_id.clone()?, video)))
                    .collect(),
                Err(err) => {
                    warn!(error = %err, "batch preview video lookup failed");
                    HashMap::new()
                }
            }
        };
        let (image_urls, preview_videos) = tokio::join!(images_fut, videos_fut);

        for playlist in &mut playlists {
            let preview = preview_by_playlist
                .get(&playlist.playlist_id)
                .and_then(|video_id| preview_videos.get(video_id));
            if let Some(video) = preview {
                let mut item = PlaylistVideoItem::from_video(video);
                item.playlist_id = Some(playlist.playlist_id.clone());
                match playback_token::sign(&item.video_id, &play_key, &self.region) {
                    Ok(token) => item.play_auth = Some(token),
                    Err(err) => {
                        warn!(error = %err, video_id = %item.video_id, "credential signing failed for preview")
                    }
                }
                playlist.playlist_videos = vec![item];
            }

            if let Some(url) = playlist
                .playlist_cover_url
                .as_ref()
                .and_then(|id| image_urls.get(id))
            {
                playlist.playlist_cover_url = Some(url.clone());
            }
        }

        Ok(playlists)
    }

    async fn first_playlist_id(&self) -> Result<String> {
        let page = self.gateway.list_playlists(&PageRequest::default()).await?;
        page.playlists
            .first()
            .and_then(|summary| summary.playlist_id.clone())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::NotFound("playlist list is empty".to_string()))
    }
}

/// Extract `previewVideoId` from the free-form playlist extension JSON.
/// Malformed extensions are logged and treated as carrying no preview.
fn extract_preview_video_id(extension: Option<&str>) -> Option<String> {
    let raw = extension?.trim();
    if raw.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => value
            .get("previewVideoId")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string),
        Err(err) => {
            warn!(error = %err, "failed to parse playlist extension");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    use crate::services::vod::types::{
        ImageInfo, PlaylistDetail, PlaylistItem, PlaylistPage, PlaylistSummary, VideoInfo,
    };

    const PLAY_KEY: &str = "aggregator-test-key";

    #[derive(Default)]
    struct MockVod {
        detail: Option<PlaylistDetail>,
        page: PlaylistPage,
        images: Vec<ImageInfo>,
        videos: Vec<VideoInfo>,
        play_key: Option<String>,
        fail_playlist: bool,
        fail_images: bool,
        fail_videos: bool,
        requested_playlist_ids: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl VodGateway for MockVod {
        async fn get_playlist(&self, playlist_id: &str) -> Result<Option<PlaylistDetail>> {
            self.requested_playlist_ids
                .lock()
                .unwrap()
                .push(playlist_id.to_string());
            if self.fail_playlist {
                return Err(AppError::Upstream("GetPlaylist failed".into()));
            }
            Ok(self.detail.clone())
        }

        async fn list_playlists(&self, _page: &PageRequest) -> Result<PlaylistPage> {
            Ok(self.page.clone())
        }

        async fn get_image_infos(&self, _image_ids: &str) -> Result<Vec<ImageInfo>> {
            if self.fail_images {
                return Err(AppError::Upstream("GetImageInfos failed".into()));
            }
            Ok(self.images.clone())
        }

        async fn get_video_infos(&self, _video_ids: &str) -> Result<Vec<VideoInfo>> {
            if self.fail_videos {
                return Err(AppError::Upstream("GetVideoInfos failed".into()));
            }
            Ok(self.videos.clone())
        }

        async fn get_app_play_key(&self, _app_id: &str) -> Result<Option<String>> {
            Ok(self.play_key.clone())
        }
    }

    fn service(mock: Arc<MockVod>) -> PlaylistService {
        let cache = Arc::new(PlayKeyCache::new(mock.clone(), Duration::from_secs(600)));
        PlaylistService::new(mock, cache, "app-1000000", "cn-shanghai")
    }

    fn detail_fixture(id: &str, video_ids: &[&str]) -> PlaylistDetail {
        PlaylistDetail {
            playlist_id: Some(id.to_string()),
            playlist_name: Some("Favorites".to_string()),
            playlist_cover_url: Some("img-cover-1".to_string()),
            playlist_videos: video_ids
                .iter()
                .map(|video_id| PlaylistItem {
                    playlist_id: Some(id.to_string()),
                    video_id: Some(video_id.to_string()),
                    title: Some(format!("title-{}", video_id)),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    fn summary_fixture(id: &str, cover: Option<&str>, extension: Option<&str>) -> PlaylistSummary {
        PlaylistSummary {
            playlist_id: Some(id.to_string()),
            playlist_name: Some(format!("name-{}", id)),
            playlist_cover_url: cover.map(str::to_string),
            playlist_extension: extension.map(str::to_string),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn detail_without_id_and_empty_listing_is_not_found() {
        let mock = Arc::new(MockVod {
            play_key: Some(PLAY_KEY.to_string()),
            ..Default::default()
        });

        let err = service(mock).get_playlist_detail(None).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn detail_without_id_falls_back_to_first_playlist() {
        let mock = Arc::new(MockVod {
            page: PlaylistPage {
                playlists: vec![summary_fixture("pl-first", None, None)],
                ..Default::default()
            },
            detail: Some(detail_fixture("pl-first", &[])),
            play_key: Some(PLAY_KEY.to_string()),
            ..Default::default()
        });

        let playlist = service(mock.clone())
            .get_playlist_detail(Some("  "))
            .await
            .unwrap();

        assert_eq!(playlist.playlist_id, "pl-first");
        assert_eq!(
            *mock.requested_playlist_ids.lock().unwrap(),
            vec!["pl-first".to_string()]
        );
    }

    #[tokio::test]
    async fn detail_signs_every_item_in_upstream_order() {
        let mock = Arc::new(MockVod {
            detail: Some(detail_fixture("pl-1", &["vid-a", "vid-b"])),
            play_key: Some(PLAY_KEY.to_string()),
            ..Default::default()
        });

        let playlist = service(mock)
            .get_playlist_detail(Some("pl-1"))
            .await
            .unwrap();

        assert_eq!(playlist.playlist_videos.len(), 2);
        assert_eq!(playlist.playlist_videos[0].video_id, "vid-a");
        assert_eq!(playlist.playlist_videos[1].video_id, "vid-b");
        for item in &playlist.playlist_videos {
            let token = item.play_auth.as_deref().expect("credential attached");
            assert!(playback_token::verify(token, PLAY_KEY).is_ok());
        }
    }

    #[tokio::test]
    async fn detail_skips_credentials_for_blank_video_ids() {
        let mock = Arc::new(MockVod {
            detail: Some(detail_fixture("pl-1", &["vid-a", "  "])),
            play_key: Some(PLAY_KEY.to_string()),
            ..Default::default()
        });

        let playlist = service(mock)
            .get_playlist_detail(Some("pl-1"))
            .await
            .unwrap();

        assert!(playlist.playlist_videos[0].play_auth.is_some());
        assert!(playlist.playlist_videos[1].play_auth.is_none());
    }

    #[tokio::test]
    async fn detail_cover_failure_is_swallowed() {
        let mock = Arc::new(MockVod {
            detail: Some(detail_fixture("pl-1", &["vid-a"])),
            play_key: Some(PLAY_KEY.to_string()),
            fail_images: true,
            ..Default::default()
        });

        let playlist = service(mock)
            .get_playlist_detail(Some("pl-1"))
            .await
            .unwrap();

        // The cover keeps its pre-resolution value and the items still sign.
        assert_eq!(playlist.playlist_cover_url.as_deref(), Some("img-cover-1"));
        assert!(playlist.playlist_videos[0].play_auth.is_some());
    }

    #[tokio::test]
    async fn detail_cover_resolves_to_url() {
        let mock = Arc::new(MockVod {
            detail: Some(detail_fixture("pl-1", &[])),
            images: vec![ImageInfo {
                image_id: Some("img-cover-1".to_string()),
                url: Some("https://cdn.example.com/cover.jpg".to_string()),
            }],
            play_key: Some(PLAY_KEY.to_string()),
            ..Default::default()
        });

        let playlist = service(mock)
            .get_playlist_detail(Some("pl-1"))
            .await
            .unwrap();

        assert_eq!(
            playlist.playlist_cover_url.as_deref(),
            Some("https://cdn.example.com/cover.jpg")
        );
    }

    #[tokio::test]
    async fn detail_cover_cleared_when_resolution_yields_nothing() {
        let mock = Arc::new(MockVod {
            detail: Some(detail_fixture("pl-1", &[])),
            images: Vec::new(),
            play_key: Some(PLAY_KEY.to_string()),
            ..Default::default()
        });

        let playlist = service(mock)
            .get_playlist_detail(Some("pl-1"))
            .await
            .unwrap();

        assert_eq!(playlist.playlist_cover_url, None);
    }

    #[tokio::test]
    async fn detail_with_videos_but_no_play_key_is_invalid_state() {
        let mock = Arc::new(MockVod {
            detail: Some(detail_fixture("pl-1", &["vid-a"])),
            play_key: None,
            ..Default::default()
        });

        let err = service(mock)
            .get_playlist_detail(Some("pl-1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
    }

    #[tokio::test]
    async fn detail_without_videos_tolerates_missing_play_key() {
        let mock = Arc::new(MockVod {
            detail: Some(detail_fixture("pl-1", &[])),
            play_key: None,
            ..Default::default()
        });

        let playlist = service(mock)
            .get_playlist_detail(Some("pl-1"))
            .await
            .unwrap();
        assert!(playlist.playlist_videos.is_empty());
    }

    #[tokio::test]
    async fn detail_upstream_failure_propagates() {
        let mock = Arc::new(MockVod {
            fail_playlist: true,
            play_key: Some(PLAY_KEY.to_string()),
            ..Default::default()
        });

        let err = service(mock)
            .get_playlist_detail(Some("pl-1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[tokio::test]
    async fn detail_unknown_playlist_is_not_found() {
        let mock = Arc::new(MockVod {
            detail: None,
            play_key: Some(PLAY_KEY.to_string()),
            ..Default::default()
        });

        let err = service(mock)
            .get_playlist_detail(Some("pl-missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_empty_page_is_not_found() {
        let mock = Arc::new(MockVod {
            play_key: Some(PLAY_KEY.to_string()),
            ..Default::default()
        });

        let err = service(mock)
            .get_playlist_list(&PageRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_without_play_key_is_invalid_state() {
        let mock = Arc::new(MockVod {
            page: PlaylistPage {
                playlists: vec![summary_fixture("pl-1", None, None)],
                ..Default::default()
            },
            play_key: None,
            ..Default::default()
        });

        let err = service(mock)
            .get_playlist_list(&PageRequest::default())
            .await
            .unwrap_err();
        // No partial list comes back: the operation fails outright.
        assert!(matches!(err, AppError::InvalidState(_)));
    }

    #[tokio::test]
    async fn list_attaches_signed_preview_and_resolved_cover() {
        let mock = Arc::new(MockVod {
            page: PlaylistPage {
                playlists: vec![summary_fixture(
                    "pl-1",
                    Some("img-1"),
                    Some(r#"{"previewVideoId":"vid-preview"}"#),
                )],
                ..Default::default()
            },
            images: vec![ImageInfo {
                image_id: Some("img-1".to_string()),
                url: Some("https://cdn.example.com/1.jpg".to_string()),
            }],
            videos: vec![VideoInfo {
                video_id: Some("vid-preview".to_string()),
                title: Some("Preview".to_string()),
                ..Default::default()
            }],
            play_key: Some(PLAY_KEY.to_string()),
            ..Default::default()
        });

        let playlists = service(mock)
            .get_playlist_list(&PageRequest::default())
            .await
            .unwrap();

        assert_eq!(playlists.len(), 1);
        let playlist = &playlists[0];
        assert_eq!(
            playlist.playlist_cover_url.as_deref(),
            Some("https://cdn.example.com/1.jpg")
        );
        assert_eq!(playlist.playlist_videos.len(), 1);

        let preview = &playlist.playlist_videos[0];
        assert_eq!(preview.video_id, "vid-preview");
        assert_eq!(preview.playlist_id.as_deref(), Some("pl-1"));
        let token = preview.play_auth.as_deref().expect("preview credential");
        assert!(playback_token::verify(token, PLAY_KEY).is_ok());
    }

    #[tokio::test]
    async fn list_tolerates_malformed_extension() {
        let mock = Arc::new(MockVod {
            page: PlaylistPage {
                playlists: vec![
                    summary_fixture("pl-bad", None, Some("{not json")),
                    summary_fixture("pl-good", None, Some(r#"{"previewVideoId":"vid-1"}"#)),
                ],
                ..Default::default()
            },
            videos: vec![VideoInfo {
                video_id: Some("vid-1".to_string()),
                ..Default::default()
            }],
            play_key: Some(PLAY_KEY.to_string()),
            ..Default::default()
        });

        let playlists = service(mock)
            .get_playlist_list(&PageRequest::default())
            .await
            .unwrap();

        assert_eq!(playlists.len(), 2);
        assert!(playlists[0].playlist_videos.is_empty());
        assert_eq!(playlists[1].playlist_videos.len(), 1);
    }

    #[tokio::test]
    async fn list_batch_failures_degrade_to_no_enrichment() {
        let mock = Arc::new(MockVod {
            page: PlaylistPage {
                playlists: vec![summary_fixture(
                    "pl-1",
                    Some("img-1"),
                    Some(r#"{"previewVideoId":"vid-1"}"#),
                )],
                ..Default::default()
            },
            fail_images: true,
            fail_videos: true,
            play_key: Some(PLAY_KEY.to_string()),
            ..Default::default()
        });

        let playlists = service(mock)
            .get_playlist_list(&PageRequest::default())
            .await
            .unwrap();

        // Unresolved cover keeps the raw image id; no preview is attached.
        assert_eq!(playlists[0].playlist_cover_url.as_deref(), Some("img-1"));
        assert!(playlists[0].playlist_videos.is_empty());
    }

    #[tokio::test]
    async fn list_preserves_upstream_order() {
        let mock = Arc::new(MockVod {
            page: PlaylistPage {
                playlists: vec![
                    summary_fixture("pl-3", None, None),
                    summary_fixture("pl-1", None, None),
                    summary_fixture("pl-2", None, None),
                ],
                ..Default::default()
            },
            play_key: Some(PLAY_KEY.to_string()),
            ..Default::default()
        });

        let playlists = service(mock)
            .get_playlist_list(&PageRequest::default())
            .await
            .unwrap();

        let ids: Vec<&str> = playlists
            .iter()
            .map(|playlist| playlist.playlist_id.as_str())
            .collect();
        assert_eq!(ids, vec!["pl-3", "pl-1", "pl-2"]);
    }

    #[test]
    fn preview_id_extraction_handles_edge_cases() {
        assert_eq!(
            extract_preview_video_id(Some(r#"{"previewVideoId":"vid-1"}"#)),
            Some("vid-1".to_string())
        );
        assert_eq!(
            extract_preview_video_id(Some(r#"{"previewVideoId":"  "}"#)),
            None
        );
        assert_eq!(extract_preview_video_id(Some(r#"{"other":1}"#)), None);
        assert_eq!(extract_preview_video_id(Some("{broken")), None);
        assert_eq!(extract_preview_video_id(Some("   ")), None);
        assert_eq!(extract_preview_video_id(None), None);
    }
}
