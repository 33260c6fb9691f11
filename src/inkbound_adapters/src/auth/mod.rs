pub mod extract;
pub mod jwt;

pub use extract::AuthenticatedUser;
pub use jwt::{
    decode_access_token, generate_token_pair, JwtConfig, JwtConfigError, TokenAuthError, TokenPair,
};
