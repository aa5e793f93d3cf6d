use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use xrocket::{
    ClientConfig, CreateInvoiceOptions, InvoiceStatus, NetworkCode, WebhookType, XRocketClient,
    XRocketError,
};

const TOKEN: &str = "test-token";

fn client_for(server: &MockServer) -> XRocketClient {
    let config = ClientConfig::new(TOKEN)
        .with_base_url(server.uri())
        .unwrap();
    XRocketClient::new(config).unwrap()
}

fn invoice_json() -> serde_json::Value {
    serde_json::json!({
        "id": 1234,
        "amount": 1.23,
        "minPayment": 0,
        "totalActivations": 1,
        "activationsLeft": 1,
        "description": "best thing in the world, 1 item",
        "hiddenMessage": "thank you",
        "payload": "order-1234",
        "callbackUrl": "https://t.me/ton_rocket",
        "commentsEnabled": false,
        "currency": "TONCOIN",
        "created": "2024-03-01T10:00:00.000Z",
        "status": "active",
        "expiredIn": 600,
        "link": "https://t.me/xrocket?start=inv_1234"
    })
}

#[tokio::test]
async fn test_app_info_sends_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/app/info"))
        .and(header("Rocket-Pay-Key", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {
                "name": "My shop",
                "feePercents": 1.5,
                "balances": [{ "currency": "TONCOIN", "balance": 12.5 }]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let info = client_for(&server).app_info().await.unwrap();
    assert_eq!(info.name, "My shop");
    assert_eq!(info.fee_percents, 1.5);
    assert_eq!(info.balances[0].currency, "TONCOIN");
}

#[tokio::test]
async fn test_create_invoice_posts_camel_case_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tg-invoices"))
        .and(header("rocket-pay-key", TOKEN))
        .and(body_json(serde_json::json!({
            "amount": 1.23,
            "currency": "TONCOIN",
            "description": "best thing in the world, 1 item",
            "expiredIn": 600
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "success": true,
            "data": invoice_json()
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = CreateInvoiceOptions::new(1.23)
        .with_currency("TONCOIN")
        .with_description("best thing in the world, 1 item")
        .with_expired_in(600);
    let invoice = client_for(&server).create_invoice(&options).await.unwrap();

    assert_eq!(invoice.id, 1234);
    assert_eq!(invoice.status, InvoiceStatus::Active);
    assert_eq!(invoice.payload.as_deref(), Some("order-1234"));
    assert_eq!(invoice.link, "https://t.me/xrocket?start=inv_1234");
}

#[tokio::test]
async fn test_create_invoice_validates_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tg-invoices"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .create_invoice(&CreateInvoiceOptions::new(-5.0))
        .await;
    assert!(matches!(result, Err(XRocketError::InvalidInvoice(_))));
}

#[tokio::test]
async fn test_api_failure_maps_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tg-invoices"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "success": false,
            "message": "Validation error",
            "errors": [{ "property": "currency", "error": "currency is not supported" }]
        })))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .create_invoice(&CreateInvoiceOptions::new(1.0).with_currency("NOPE"))
        .await;
    match result {
        Err(XRocketError::Api { message, errors }) => {
            assert_eq!(message, "Validation error");
            assert_eq!(errors[0].property, "currency");
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthorized_without_envelope_is_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/app/info"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let result = client_for(&server).app_info().await;
    assert!(matches!(result, Err(XRocketError::Http(_))));
}

#[tokio::test]
async fn test_malformed_success_body_is_serde_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/app/info"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let result = client_for(&server).app_info().await;
    assert!(matches!(result, Err(XRocketError::Serde(_))));
}

#[tokio::test]
async fn test_currencies_unwraps_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/currencies/available"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {
                "results": [{
                    "currency": "USDT",
                    "name": "Tether",
                    "minTransfer": 0.1,
                    "minCheque": 0.1,
                    "minInvoice": 0.1,
                    "minWithdraw": 5,
                    "feeWithdraw": {
                        "currency": "USDT",
                        "networks": [
                            { "networkCode": "TON", "feeWithdraw": { "fee": 0.3, "currency": "USDT" } },
                            { "networkCode": "TRX", "feeWithdraw": { "fee": 1.0, "currency": "USDT" } }
                        ]
                    }
                }]
            }
        })))
        .mount(&server)
        .await;

    let currencies = client_for(&server).currencies().await.unwrap();
    assert_eq!(currencies.len(), 1);
    assert_eq!(currencies[0].currency, "USDT");
    assert_eq!(
        currencies[0].fee_withdraw.networks[1].network_code,
        NetworkCode::Trx
    );
}

#[tokio::test]
async fn test_client_verifies_webhooks_with_same_token() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let body = r#"{"type":"invoicePay"}"#;
    let sig = client.verifier().sign(body);
    assert!(client.verify_webhook_signature(body, &[("Rocket-Pay-Signature", sig.as_str())]));
    assert!(!client.verify_webhook_signature(body, &[("Rocket-Pay-Signature", "00")]));
}

#[tokio::test]
async fn test_success_without_data_is_serde_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/currencies/available"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "success": true })),
        )
        .mount(&server)
        .await;

    let result = client_for(&server).currencies().await;
    assert!(matches!(result, Err(XRocketError::Serde(_))));
}

#[tokio::test]
async fn test_client_parses_signed_webhook() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let body = serde_json::json!({
        "type": "invoicePay",
        "timestamp": "2024-03-01T10:05:00.000Z",
        "data": {
            "id": 1234,
            "amount": 1.23,
            "minPayment": 0,
            "totalActivations": 1,
            "activationsLeft": 0,
            "payload": "order-1234",
            "currency": "TONCOIN",
            "created": "2024-03-01T10:00:00.000Z",
            "paid": "2024-03-01T10:05:00.000Z",
            "status": "paid",
            "link": "https://t.me/xrocket?start=inv_1234",
            "payment": {
                "userId": 42,
                "paymentNum": 1,
                "paymentAmount": 1.23,
                "comment": "thanks",
                "paid": "2024-03-01T10:05:00.000Z"
            }
        }
    })
    .to_string();
    let sig = client.verifier().sign(&body);

    let webhook = client
        .parse_webhook(&body, &[("Rocket-Pay-Signature", sig.as_str())])
        .unwrap();
    assert_eq!(webhook.kind, WebhookType::InvoicePay);
    assert_eq!(webhook.data.status, InvoiceStatus::Paid);
    assert_eq!(webhook.data.payment.user_id, 42);

    let rejected = client.parse_webhook(&body, &[("Rocket-Pay-Signature", "00")]);
    assert!(matches!(rejected, Err(XRocketError::InvalidSignature)));
}
