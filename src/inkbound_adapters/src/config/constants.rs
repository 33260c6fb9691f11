/// Multipart avatar uploads are capped at 0.5 MB.
pub const MAX_AVATAR_SIZE_BYTES: usize = 512 * 1024;

/// Access and refresh tokens are both valid for seven days.
pub const TOKEN_TTL_SECONDS: i64 = 60 * 60 * 24 * 7;

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";

    pub mod email_client {
        use std::time::Duration;

        pub const BASE_URL: &str = "https://api.postmarkapp.com/";
        pub const TIMEOUT: Duration = Duration::from_secs(10);
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";

    pub mod email_client {
        use std::time::Duration;

        pub const SENDER: &str = "test@email.com";
        pub const TIMEOUT: Duration = Duration::from_millis(200);
    }
}
