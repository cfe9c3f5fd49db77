/// Play key caching
///
/// The VOD play key signs every playback credential, so it is needed on
/// every aggregated request; this cache keeps the most recent key for a
/// fixed TTL to avoid hammering `GetAppPlayKey`.
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::debug;

use crate::error::Result;
use crate::services::vod::VodGateway;

/// One cached key. Replaced wholesale on refresh, so readers observe either
/// the previous entry or the complete new one.
struct CachedPlayKey {
    app_id: String,
    play_key: String,
    expires_at: Instant,
}

impl CachedPlayKey {
    fn is_fresh(&self, app_id: &str) -> bool {
        self.app_id == app_id && Instant::now() < self.expires_at
    }
}

/// Single-slot play key cache with a fixed TTL.
///
/// Concurrent callers that miss the cache may each trigger an upstream
/// fetch; the slot is replaced atomically and the last writer wins.
pub struct PlayKeyCache {
    gateway: Arc<dyn VodGateway>,
    ttl: Duration,
    slot: RwLock<Option<CachedPlayKey>>,
}

impl PlayKeyCache {
    pub fn new(gateway: Arc<dyn VodGateway>, ttl: Duration) -> Self {
        Self {
            gateway,
            ttl,
            slot: RwLock::new(None),
        }
    }

    /// Return the play key for `app_id`, fetching from upstream on a miss.
    ///
    /// `Ok(None)` means the upstream answered but carried no usable key;
    /// nothing is cached in that case. Upstream call failures propagate as
    /// errors and likewise leave the slot untouched.
    pub async fn get_play_key(&self, app_id: &str) -> Result<Option<String>> {
        {
            let slot = self.slot.read().await;
            if let Some(cached) = slot.as_ref() {
                if cached.is_fresh(app_id) {
                    return Ok(Some(cached.play_key.clone()));
                }
            }
        }

        let fetched = self.gateway.get_app_play_key(app_id).await?;
        let play_key = match fetched {
            Some(key) if !key.trim().is_empty() => key,
            _ => return Ok(None),
        };

        debug!(app_id, ttl_secs = self.ttl.as_secs(), "caching refreshed play key");
        let mut slot = self.slot.write().await;
        *slot = Some(CachedPlayKey {
            app_id: app_id.to_string(),
            play_key: play_key.clone(),
            expires_at: Instant::now() + self.ttl,
        });

        Ok(Some(play_key))
    }
}
