use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::handlers::{health, notification, page, payment, token};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Service
        .route("/health", get(health::health_check))
        .route("/status", get(health::status))
        // Gateway protocol
        .route("/token", post(token::issue_token))
        .route("/create-payment", post(payment::create_payment))
        .route(
            "/process-mock-payment/{session_id}",
            post(payment::process_mock_payment),
        )
        .route("/payment-notification", post(notification::payment_notification))
        .route("/api/payments/{session_id}", get(payment::get_payment))
        // Pages
        .route("/mock-payment/{session_id}", get(page::mock_payment_page))
        .route("/payment-success", get(page::success_page))
        .route("/payment-cancel", get(page::cancel_page))
        .with_state(state)
        // Development tool: any origin may call it
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use gateway_infrastructure::HttpNotificationSender;
    use gateway_shared::config::AppConfig;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(notification_url: Option<String>) -> AppConfig {
        let mut config = AppConfig::default();
        config.app.public_base_url = Some("http://gateway.test".into());
        config.merchant.notification_url = notification_url;
        config.merchant.success_url = Some("https://shop.test/success".into());
        config.merchant.cancel_url = Some("https://shop.test/cancel".into());
        config
    }

    fn app(config: &AppConfig) -> Router {
        let notifier = Arc::new(HttpNotificationSender::new(Duration::from_secs(2)).unwrap());
        build_router(AppState::new(config, notifier).unwrap())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn post_raw(uri: &str, content_type: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_str(&body_text(response).await).unwrap()
    }

    async fn create(app: &Router, order_id: &str) -> String {
        let response = send(
            app,
            post_json(
                "/create-payment",
                json!({ "amount": 5000, "currency": "MGA", "order_id": order_id }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await["pay_token"]
            .as_str()
            .unwrap()
            .to_string()
    }

    async fn wait_for_requests(server: &MockServer, count: usize) -> Vec<wiremock::Request> {
        for _ in 0..100 {
            if let Some(requests) = server.received_requests().await {
                if requests.len() >= count {
                    return requests;
                }
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("expected {} notification(s)", count);
    }

    #[tokio::test]
    async fn test_end_to_end_payment_flow() {
        let merchant = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/notify"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&merchant)
            .await;

        let app = app(&config(Some(format!("{}/notify", merchant.uri()))));

        let response = send(
            &app,
            post_json(
                "/create-payment",
                json!({ "amount": 5000, "currency": "MGA", "order_id": "SO001" }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let created = body_json(response).await;
        assert_eq!(created["success"], true);
        let pay_token = created["pay_token"].as_str().unwrap().to_string();
        assert_eq!(
            created["payment_url"],
            format!("http://gateway.test/mock-payment/{}", pay_token)
        );

        let response = send(&app, get(&format!("/mock-payment/{}", pay_token))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("5000"));
        assert!(html.contains("MGA"));

        let response = send(
            &app,
            post_json(
                &format!("/process-mock-payment/{}", pay_token),
                json!({ "status": "SUCCESS" }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "redirect_url": "https://shop.test/success" })
        );

        let requests = wait_for_requests(&merchant, 1).await;
        let notified: Value = requests[0].body_json().unwrap();
        assert_eq!(notified["order_id"], "SO001");
        assert_eq!(notified["status"], "SUCCESS");
        assert_eq!(notified["amount"], 5000);
        assert_eq!(notified["currency"], "MGA");
        assert!(notified["txnid"].as_str().is_some_and(|t| !t.is_empty()));

        let response = send(&app, get(&format!("/api/payments/{}", pay_token))).await;
        let session = body_json(response).await;
        assert_eq!(session["status"], "SUCCESS");
    }

    #[tokio::test]
    async fn test_missing_field_is_rejected_without_storing() {
        let app = app(&config(None));

        let response = send(
            &app,
            post_json("/create-payment", json!({ "amount": 5000, "currency": "MGA" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error = body_json(response).await;
        assert_eq!(error["success"], false);
        assert!(error["message"].as_str().unwrap().contains("order_id"));

        let status = body_json(send(&app, get("/status")).await).await;
        assert_eq!(status["payments_count"], 0);
    }

    #[tokio::test]
    async fn test_numeric_order_id_is_accepted() {
        let app = app(&config(None));

        let response = send(
            &app,
            post_json(
                "/create-payment",
                json!({ "amount": 5000, "currency": "MGA", "order_id": 1001 }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let pay_token = body_json(response).await["pay_token"]
            .as_str()
            .unwrap()
            .to_string();

        let session = body_json(send(&app, get(&format!("/api/payments/{}", pay_token))).await).await;
        assert_eq!(session["order_id"], "1001");
        assert_eq!(session["amount"], 5000);
    }

    #[tokio::test]
    async fn test_malformed_create_body_is_bad_request() {
        let app = app(&config(None));
        let response = send(
            &app,
            post_raw("/create-payment", "application/json", "{\"amount\": "),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_form_create_redirects_to_payment_page() {
        let app = app(&config(None));

        let response = send(
            &app,
            post_raw(
                "/create-payment",
                "application/x-www-form-urlencoded",
                "amount=2500&currency=MGA&order_id=SO010&customer_phone=0341234567",
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response.headers()[header::LOCATION].to_str().unwrap().to_string();
        assert!(location.starts_with("http://gateway.test/mock-payment/"));

        let session_id = location.rsplit('/').next().unwrap();
        let session = body_json(send(&app, get(&format!("/api/payments/{}", session_id))).await).await;
        assert_eq!(session["amount"], "2500");
        assert_eq!(session["status"], "PENDING");
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let app = app(&config(None));
        create(&app, "SO020").await;

        let response = send(&app, get("/mock-payment/unknown")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(
            &app,
            post_json("/process-mock-payment/unknown", json!({ "status": "SUCCESS" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&app, get("/api/payments/unknown")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_second_resolution_conflicts() {
        let app = app(&config(None));
        let pay_token = create(&app, "SO030").await;
        let uri = format!("/process-mock-payment/{}", pay_token);

        let response = send(&app, post_json(&uri, json!({ "status": "CANCELLED" }))).await;
        assert_eq!(
            body_json(response).await["redirect_url"],
            "https://shop.test/cancel"
        );

        let response = send(&app, post_json(&uri, json!({ "status": "SUCCESS" }))).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let session = body_json(send(&app, get(&format!("/api/payments/{}", pay_token))).await).await;
        assert_eq!(session["status"], "CANCELLED");
        assert!(session["transaction_id"].is_null());
    }

    #[tokio::test]
    async fn test_unrecognised_status_resolves_as_failed() {
        let mut cfg = config(None);
        cfg.merchant.cancel_url = None;
        let app = app(&cfg);
        let pay_token = create(&app, "SO040").await;

        let response = send(
            &app,
            post_json(
                &format!("/process-mock-payment/{}", pay_token),
                json!({ "status": "maybe" }),
            ),
        )
        .await;
        assert_eq!(
            body_json(response).await["redirect_url"],
            "http://gateway.test/payment-cancel"
        );

        let session = body_json(send(&app, get(&format!("/api/payments/{}", pay_token))).await).await;
        assert_eq!(session["status"], "FAILED");
    }

    #[tokio::test]
    async fn test_empty_process_body_resolves_as_failed() {
        let app = app(&config(None));
        let pay_token = create(&app, "SO050").await;

        let request = Request::builder()
            .method("POST")
            .uri(format!("/process-mock-payment/{}", pay_token))
            .body(Body::empty())
            .unwrap();
        let response = send(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let session = body_json(send(&app, get(&format!("/api/payments/{}", pay_token))).await).await;
        assert_eq!(session["status"], "FAILED");
    }

    #[tokio::test]
    async fn test_payment_notification_acknowledgement() {
        let app = app(&config(None));

        let response = send(
            &app,
            post_json(
                "/payment-notification",
                json!({ "order_id": "SO001", "status": "SUCCESS", "txnid": "MP1" }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "status": "received" }));

        let response = send(
            &app,
            post_raw("/payment-notification", "text/plain", "not json at all"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_status_counts_sessions_and_tokens() {
        let app = app(&config(None));
        for i in 0..3 {
            create(&app, &format!("SO10{}", i)).await;
        }
        let response = send(&app, post_json("/token", json!({}))).await;
        let token = body_json(response).await;
        assert_eq!(token["token_type"], "Bearer");
        assert_eq!(token["expires_in"], 3600);

        let status = body_json(send(&app, get("/status")).await).await;
        assert_eq!(status["status"], "running");
        assert_eq!(status["mode"], "development");
        assert_eq!(status["payments_count"], 3);
        assert_eq!(status["tokens_count"], 4);
    }

    #[tokio::test]
    async fn test_static_pages() {
        let app = app(&config(None));
        for uri in ["/payment-success", "/payment-cancel", "/health"] {
            let response = send(&app, get(uri)).await;
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        }
    }
}
