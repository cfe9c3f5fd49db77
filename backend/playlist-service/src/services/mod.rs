/// Business services for playlist-service
pub mod playlist;
pub mod vod;

pub use playlist::PlaylistService;
pub use vod::{VodClient, VodGateway};
