use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method, request},
    routing::{delete, get, post},
    Extension, Json, Router,
};
use inkbound_adapters::{
    config::AllowedOrigins,
    http::routes::{
        add_favorite, change_password, forgot_password, get_profile, last_chapter, list_favorites,
        login, reading_list, register, remove_favorite, resend_verification, update_profile,
        update_progress, verify, MessageResponse,
    },
    JwtConfig,
};
use inkbound_core::{
    EmailClient, FavoriteStore, MediaStore, PasswordHasher, ReadingProgressStore, UserStore,
    VerificationTokenStore,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// The comic-reading backend: auth + verification core plus the per-user
/// comic records, assembled into a single router.
pub struct ComicService {
    router: Router,
}

impl ComicService {
    /// Wire the service from its stores and external-service clients.
    ///
    /// Each route receives exactly the state it needs. Stores and clients
    /// are `Clone` (internally `Arc`-backed), so the clones here share one
    /// underlying resource. The `JwtConfig` rides a request extension so the
    /// bearer extractor can reach it regardless of handler state.
    #[allow(clippy::too_many_arguments)]
    pub fn new<U, V, R, F, H, E, M>(
        user_store: U,
        token_store: V,
        progress_store: R,
        favorite_store: F,
        password_hasher: H,
        email_client: E,
        media_store: M,
        jwt_config: JwtConfig,
        base_url: String,
    ) -> Self
    where
        U: UserStore + Clone + 'static,
        V: VerificationTokenStore + Clone + 'static,
        R: ReadingProgressStore + Clone + 'static,
        F: FavoriteStore + Clone + 'static,
        H: PasswordHasher + Clone + 'static,
        E: EmailClient + Clone + 'static,
        M: MediaStore + Clone + 'static,
    {
        let jwt_config = Arc::new(jwt_config);

        let router = Router::new()
            .route("/", get(welcome))
            // Registration needs the full verification pipeline
            .route("/api/register", post(register::<U, V, H, E>))
            .with_state((
                user_store.clone(),
                token_store.clone(),
                password_hasher.clone(),
                email_client.clone(),
                base_url.clone(),
            ))
            // Verification consumes the ledger and flips the user flag
            .route("/api/verify/{code}", get(verify::<U, V, H>))
            .with_state((
                user_store.clone(),
                token_store.clone(),
                password_hasher.clone(),
            ))
            .route("/api/login", post(login::<U, H>))
            .with_state((user_store.clone(), password_hasher.clone()))
            .route("/api/forgot-password", post(forgot_password::<U, H, E>))
            .with_state((
                user_store.clone(),
                password_hasher.clone(),
                email_client.clone(),
            ))
            .route("/api/change-password", post(change_password::<U, H>))
            .with_state((user_store.clone(), password_hasher.clone()))
            .route(
                "/api/resend-verification",
                post(resend_verification::<U, V, H, E>),
            )
            .with_state((
                user_store.clone(),
                token_store,
                password_hasher,
                email_client,
                base_url,
            ))
            .route(
                "/api/profile",
                get(get_profile::<U, M>).put(update_profile::<U, M>),
            )
            .with_state((user_store, media_store))
            .route("/api/comic/reading-list", get(reading_list::<R>))
            .with_state(progress_store.clone())
            .route("/api/comic/last-chapter/{slug}", get(last_chapter::<R>))
            .with_state(progress_store.clone())
            .route("/api/comic/update-progress", post(update_progress::<R>))
            .with_state(progress_store)
            .route(
                "/api/comic/favorites",
                post(add_favorite::<F>).get(list_favorites::<F>),
            )
            .with_state(favorite_store.clone())
            .route("/api/comic/favorites/{slug}", delete(remove_favorite::<F>))
            .with_state(favorite_store)
            .layer(Extension(jwt_config));

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Finish the router, optionally restricting CORS to the configured
    /// origins.
    pub fn into_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the service as a standalone server.
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.into_router(allowed_origins);

        axum::serve(listener, router).await
    }
}

async fn welcome() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to the Inkbound API".to_string(),
    })
}
