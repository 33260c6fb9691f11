use testcontainers_modules::postgres;
use testcontainers_modules::testcontainers::runners::AsyncRunner;

#[tokio::test]
#[ignore = "requires a running Docker daemon"]
async fn postgres_container_starts() {
    let _container = postgres::Postgres::default().start().await.unwrap();
}
