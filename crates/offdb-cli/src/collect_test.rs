use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use offdb_catalog::CatalogConfig;

use super::*;

fn test_client(base_url: &str) -> OffClient {
    let config = CatalogConfig {
        user_agent: "offdb-test/0.1".to_owned(),
        base_url: base_url.to_owned(),
        timeout_secs: 5,
    };
    OffClient::new(&config).expect("failed to build test OffClient")
}

async fn mount_products(server: &MockServer, products: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/cgi/search.pl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "products": products })))
        .mount(server)
        .await;
}

#[sqlx::test(migrations = "../../migrations")]
async fn collect_stores_normalized_products(pool: sqlx::PgPool) {
    let server = MockServer::start().await;
    mount_products(
        &server,
        json!([
            {"code": "1", "brands": "Acme, Foo"},
            {},
            {"code": "2", "product_name": "  Granola  ", "nutriments": {"energy-kcal_100g": 450}}
        ]),
    )
    .await;

    let client = test_client(&server.uri());
    let summary = collect_products(&pool, &client, "granola", 20)
        .await
        .expect("collect_products failed");

    assert_eq!(
        summary,
        CollectSummary {
            fetched: 3,
            kept: 2,
            stored: 2
        }
    );

    let first = offdb_db::get_product(&pool, "1")
        .await
        .expect("get_product failed")
        .expect("product 1 stored");
    assert_eq!(first.name, "acme (brand)");
    assert_eq!(first.brands.as_deref(), Some("Acme, Foo"));

    let second = offdb_db::get_product(&pool, "2")
        .await
        .expect("get_product failed")
        .expect("product 2 stored");
    assert_eq!(second.name, "granola");
    assert_eq!(second.calories, Some(450.0));
}

#[sqlx::test(migrations = "../../migrations")]
async fn collect_twice_overwrites_by_code(pool: sqlx::PgPool) {
    let first_server = MockServer::start().await;
    mount_products(&first_server, json!([{"code": "X", "product_name": "Old Name"}])).await;
    collect_products(&pool, &test_client(&first_server.uri()), "x", 20)
        .await
        .expect("first collect failed");

    let second_server = MockServer::start().await;
    mount_products(
        &second_server,
        json!([{"code": "X", "product_name": "New Name", "ingredients_text": "oats"}]),
    )
    .await;
    collect_products(&pool, &test_client(&second_server.uri()), "x", 20)
        .await
        .expect("second collect failed");

    assert_eq!(offdb_db::count_products(&pool).await.unwrap(), 1);
    let row = offdb_db::get_product(&pool, "X").await.unwrap().unwrap();
    assert_eq!(row.name, "new name");
    assert_eq!(row.ingredients.as_deref(), Some("oats"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn catalog_failure_stores_nothing(pool: sqlx::PgPool) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cgi/search.pl"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let summary = collect_products(&pool, &test_client(&server.uri()), "granola", 20)
        .await
        .expect("catalog failures must not abort the run");

    assert_eq!(summary, CollectSummary::default());
    assert_eq!(offdb_db::count_products(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn storage_failure_aborts_the_run(pool: sqlx::PgPool) {
    let server = MockServer::start().await;
    mount_products(&server, json!([{"code": "1", "product_name": "Granola"}])).await;

    sqlx::query("DROP TABLE products")
        .execute(&pool)
        .await
        .expect("drop table");

    let result = collect_products(&pool, &test_client(&server.uri()), "granola", 20).await;
    assert!(result.is_err(), "storage errors must propagate");
}
