/// HTTP handlers for playlist-service
mod health;
mod playlists;

pub use health::health;
pub use playlists::{
    add_playlist_videos, create_playlist, delete_playlist_videos, delete_playlists, get_playlist,
    get_playlist_info, get_playlist_videos, get_playlists, update_playlist_basic_info,
    update_playlist_video_basic_info, update_playlist_videos,
};
