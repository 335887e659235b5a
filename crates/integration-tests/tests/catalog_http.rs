//! Integration tests for the HTTP catalog client.

#![allow(clippy::unwrap_used)]

use std::str::FromStr;

use rust_decimal::Decimal;
use secrecy::SecretString;
use serde_json::json;
use shoe_shop_cart::{Catalog, CatalogError, HttpCatalog};
use shoe_shop_core::ProductId;
use shoe_shop_integration_tests::TestContext;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_stock_uses_path_id() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/stock/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "amount": 7 })))
        .mount(&ctx.server)
        .await;

    let stock = ctx.catalog().stock(ProductId::new(4)).await.unwrap();

    assert_eq!(stock.id, ProductId::new(4));
    assert_eq!(stock.amount, 7);
}

#[tokio::test]
async fn test_product_details_are_parsed() {
    let ctx = TestContext::new().await;
    ctx.mount_product(2, "Tênis Adidas Duramo Lite 2.0", 219.9)
        .await;

    let product = ctx.catalog().product(ProductId::new(2)).await.unwrap();

    assert_eq!(product.title, "Tênis Adidas Duramo Lite 2.0");
    assert_eq!(product.price, Decimal::from_str("219.9").unwrap());
    assert_eq!(
        product.image.as_str(),
        "https://cdn.example.com/tenis2.jpg"
    );
}

#[tokio::test]
async fn test_product_details_are_cached() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/products/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "title": "Tênis de Caminhada Leve Confortável",
            "price": 179.9,
            "image": "https://cdn.example.com/tenis1.jpg",
        })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let catalog = ctx.catalog();
    let first = catalog.product(ProductId::new(1)).await.unwrap();
    // Clones share the cache
    let second = catalog.clone().product(ProductId::new(1)).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_stock_is_never_cached() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/stock/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "amount": 2 })))
        .expect(3)
        .mount(&ctx.server)
        .await;

    let catalog = ctx.catalog();
    for _ in 0..3 {
        catalog.stock(ProductId::new(1)).await.unwrap();
    }
}

#[tokio::test]
async fn test_not_found() {
    let ctx = TestContext::new().await;

    let err = ctx.catalog().stock(ProductId::new(99)).await.unwrap_err();

    assert!(matches!(err, CatalogError::NotFound(ref p) if p == "stock/99"));
}

#[tokio::test]
async fn test_rate_limited_reads_retry_after() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/stock/1"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .mount(&ctx.server)
        .await;

    let err = ctx.catalog().stock(ProductId::new(1)).await.unwrap_err();

    assert!(matches!(err, CatalogError::RateLimited(7)));
}

#[tokio::test]
async fn test_server_error_keeps_status_and_body() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/products/1"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream down"))
        .mount(&ctx.server)
        .await;

    let err = ctx.catalog().product(ProductId::new(1)).await.unwrap_err();

    match err {
        CatalogError::Status { status, body } => {
            assert_eq!(status, 502);
            assert_eq!(body, "upstream down");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_a_parse_error() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/stock/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"amount\": \"lots\"}"))
        .mount(&ctx.server)
        .await;

    let err = ctx.catalog().stock(ProductId::new(1)).await.unwrap_err();

    assert!(matches!(err, CatalogError::Parse(_)));
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/stock/1"))
        .and(header("Authorization", "Bearer k9Xq2vR7tLm4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "amount": 1 })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let mut config = ctx.catalog_config();
    config.token = Some(SecretString::from("k9Xq2vR7tLm4"));
    let catalog = HttpCatalog::new(&config).unwrap();

    assert_eq!(catalog.stock(ProductId::new(1)).await.unwrap().amount, 1);
}

#[tokio::test]
async fn test_base_url_with_path_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stock/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "amount": 5 })))
        .mount(&server)
        .await;

    let config =
        shoe_shop_cart::CatalogConfig::new(Url::parse(&format!("{}/api", server.uri())).unwrap());
    let catalog = HttpCatalog::new(&config).unwrap();

    assert_eq!(catalog.stock(ProductId::new(3)).await.unwrap().amount, 5);
}
