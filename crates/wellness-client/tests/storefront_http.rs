//! End-to-end storefront runs against a mocked pharmacy backend.

use serde_json::json;
use url::Url;
use wellness_client::{HttpApi, Recovery, Storefront, StorefrontError, StorefrontSettings};
use wellness_core::{CheckoutPhase, DeliveryMethod, Money, PaymentMethod, ProductId};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn backend_with_catalog() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/medicines/non-expired"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Paracetamol 500mg", "category": "ANALGESIC",
             "sellingPrice": 500.0, "quantity": 5, "isExpired": false},
            {"id": 2, "name": "ORS Sachet", "category": "REHYDRATION",
             "sellingPrice": 300.0, "quantity": 2, "isExpired": false},
            {"id": 3, "name": "Old Syrup", "category": "ANALGESIC",
             "sellingPrice": 900.0, "quantity": 4, "isExpired": true}
        ])))
        .mount(&server)
        .await;
    server
}

fn storefront_for(server: &MockServer) -> Storefront<HttpApi> {
    let base = Url::parse(&format!("{}/api/", server.uri())).unwrap();
    Storefront::new(HttpApi::new(base), StorefrontSettings::default())
}

fn fill_draft(store: &mut Storefront<HttpApi>) {
    let draft = store.proceed_to_checkout().unwrap();
    draft.customer_name = "Aline Uwase".to_string();
    draft.customer_phone = "+250 788 123 456".to_string();
    draft.delivery_method = DeliveryMethod::HomeDelivery;
    draft.delivery_address = "KG 11 Ave, Kimironko".to_string();
    draft.payment_method = PaymentMethod::MobileMoney;
}

#[tokio::test]
async fn test_home_delivery_order_end_to_end() {
    let server = backend_with_catalog().await;
    Mock::given(method("POST"))
        .and(path("/api/sales"))
        .and(header("authorization", "Bearer token-123"))
        .and(body_partial_json(json!({"paymentMethod": "MOBILE_MONEY"})))
        .respond_with(ResponseTemplate::new(201))
        .expect(2)
        .mount(&server)
        .await;

    let mut store = storefront_for(&server);
    store.login("token-123").unwrap();
    assert_eq!(store.refresh_catalog().await.unwrap(), 2);

    store.add_to_cart(ProductId::new(1)).unwrap();
    store.add_to_cart(ProductId::new(1)).unwrap();
    store.add_to_cart(ProductId::new(2)).unwrap();
    store.open_cart().unwrap();
    fill_draft(&mut store);

    let receipt = store.submit_order().await.unwrap();

    assert_eq!(receipt.subtotal, Money::from_major(1300));
    assert_eq!(receipt.delivery_fee, Money::from_major(2000));
    assert_eq!(receipt.total, Money::from_major(3300));
    assert_eq!(receipt.delivery_address.as_deref(), Some("KG 11 Ave, Kimironko"));
    assert_eq!(store.phase(), CheckoutPhase::Complete);
    assert!(store.cart().unwrap().is_empty());
}

#[tokio::test]
async fn test_backend_failure_mid_order_keeps_cart() {
    let server = backend_with_catalog().await;
    Mock::given(method("POST"))
        .and(path("/api/sales"))
        .and(body_partial_json(json!({"medicine": {"id": 1}})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/sales"))
        .and(body_partial_json(json!({"medicine": {"id": 2}})))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({"message": "Service unavailable"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut store = storefront_for(&server);
    store.login("token-123").unwrap();
    store.refresh_catalog().await.unwrap();
    store.add_to_cart(ProductId::new(1)).unwrap();
    store.add_to_cart(ProductId::new(2)).unwrap();
    store.open_cart().unwrap();
    fill_draft(&mut store);

    let err = store.submit_order().await.unwrap_err();

    match &err {
        StorefrontError::OrderSubmission { committed, total, .. } => {
            assert_eq!((*committed, *total), (1, 2));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.recovery(), Recovery::Retry);
    assert_eq!(store.phase(), CheckoutPhase::Failed);
    assert_eq!(store.cart().unwrap().line_count(), 2);
    assert!(store.session().unwrap().draft().is_some());
}
