pub mod http_media_client;
pub mod mock_media_client;

pub use http_media_client::HttpMediaClient;
pub use mock_media_client::MockMediaStore;
