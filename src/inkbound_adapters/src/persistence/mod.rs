pub mod hashmap_comic_store;
pub mod hashmap_user_store;
pub mod hashmap_verification_store;
pub mod postgres_comic_store;
pub mod postgres_user_store;
pub mod postgres_verification_store;
