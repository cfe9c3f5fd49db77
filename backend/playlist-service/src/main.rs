/// Playlist Service - HTTP Server
///
/// Serves aggregated playlist endpoints (detail and listing with playback
/// credentials) plus thin passthroughs to the upstream VOD API.
use actix_cors::Cors;
use actix_web::{middleware as actix_middleware, web, App, HttpServer};
use playlist_service::cache::PlayKeyCache;
use playlist_service::handlers;
use playlist_service::services::{PlaylistService, VodClient, VodGateway};
use playlist_service::Config;
use std::io;
use std::sync::Arc;
use std::time::Duration;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!(
        bind_address = %bind_address,
        env = %config.app.env,
        vod_endpoint = %config.vod.endpoint,
        "Playlist Service starting"
    );

    if config.vod.access_key_id.is_empty() || config.vod.access_key_secret.is_empty() {
        tracing::warn!("VOD access keys not set; upstream calls will be rejected");
    }

    let vod_client = Arc::new(
        VodClient::new(config.vod.clone())
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?,
    );
    let gateway: Arc<dyn VodGateway> = vod_client.clone();
    let play_keys = Arc::new(PlayKeyCache::new(
        gateway.clone(),
        Duration::from_secs(config.vod.play_key_ttl_secs),
    ));
    let playlist_service = Arc::new(PlaylistService::new(
        gateway,
        play_keys,
        config.vod.app_id.clone(),
        config.vod.region.clone(),
    ));

    HttpServer::new(move || {
        // Open CORS: the gateway fronts browser-based players
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .app_data(web::Data::new(vod_client.clone()))
            .app_data(web::Data::new(playlist_service.clone()))
            .wrap(cors)
            .wrap(actix_middleware::Logger::default())
            .service(
                web::scope("/appServer")
                    .route("/health", web::get().to(handlers::health))
                    // Aggregated endpoints
                    .route(
                        "/getPlaylistInfo",
                        web::get().to(handlers::get_playlist_info),
                    )
                    .route(
                        "/getPlaylistInfo",
                        web::post().to(handlers::get_playlist_info),
                    )
                    .route(
                        "/getPlaylistVideos",
                        web::post().to(handlers::get_playlist_videos),
                    )
                    // Passthroughs to the VOD OpenAPI
                    .route("/getPlaylist", web::get().to(handlers::get_playlist))
                    .route("/getPlaylists", web::post().to(handlers::get_playlists))
                    .route("/createPlaylist", web::post().to(handlers::create_playlist))
                    .route(
                        "/deletePlaylists",
                        web::post().to(handlers::delete_playlists),
                    )
                    .route(
                        "/updatePlaylistBasicInfo",
                        web::post().to(handlers::update_playlist_basic_info),
                    )
                    .route(
                        "/updatePlaylistVideoBasicInfo",
                        web::post().to(handlers::update_playlist_video_basic_info),
                    )
                    .route(
                        "/updatePlaylistVideos",
                        web::post().to(handlers::update_playlist_videos),
                    )
                    .route(
                        "/addPlaylistVideos",
                        web::post().to(handlers::add_playlist_videos),
                    )
                    .route(
                        "/deletePlaylistVideos",
                        web::post().to(handlers::delete_playlist_videos),
                    ),
            )
    })
    .bind(&bind_address)?
    .run()
    .await
}
