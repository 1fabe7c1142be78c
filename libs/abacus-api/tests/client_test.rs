//! Client behavior against a mocked evaluation service.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use abacus_api::dto::{
    ArithmeticRequest, LogFunction, LogarithmRequest, MatrixOperation, MatrixRequest,
    MatrixResult, TrigFunction, TrigonometryRequest,
};
use abacus_api::{ApiClient, ApiError};
use abacus_core::{AngleUnit, EvalRequest, MathFunction};

fn test_client(server: &MockServer) -> ApiClient {
    ApiClient::new(server.uri()).expect("client builds")
}

// === Success paths ===

#[tokio::test]
async fn arithmetic_evaluation_decodes_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/arithmetic/evaluate"))
        .and(body_json(json!({ "expression": "2 + 3" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "result": 5.0, "expression": "2 + 3" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let response = client
        .evaluate_arithmetic(&ArithmeticRequest {
            expression: "2 + 3".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(response.result, 5.0);
    assert_eq!(response.expression, "2 + 3");
}

#[tokio::test]
async fn trigonometry_sends_function_value_and_unit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/trigonometry/evaluate"))
        .and(body_json(json!({
            "function": "sin",
            "value": 30.0,
            "unit": "degrees"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": 0.5 })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let response = client
        .evaluate_trigonometry(&TrigonometryRequest {
            function: TrigFunction::Sin,
            value: 30.0,
            unit: AngleUnit::Degrees,
        })
        .await
        .unwrap();
    assert_eq!(response.result, 0.5);
}

#[tokio::test]
async fn evaluate_routes_machine_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/arithmetic/evaluate"))
        .and(body_json(json!({ "expression": "sqrt(9)" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "result": 3.0, "expression": "sqrt(9)" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/trigonometry/evaluate"))
        .and(body_json(json!({
            "function": "cos",
            "value": 1.0,
            "unit": "radians"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": 0.54 })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client
        .evaluate(&EvalRequest::Arithmetic {
            expression: "sqrt(9)".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(result, 3.0);

    let result = client
        .evaluate(&EvalRequest::Trigonometry {
            function: MathFunction::Cos,
            value: 1.0,
            unit: AngleUnit::Radians,
        })
        .await
        .unwrap();
    assert_eq!(result, 0.54);
}

#[tokio::test]
async fn logarithm_and_matrix_endpoints_decode() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/logarithms/evaluate"))
        .and(body_json(json!({ "function": "log", "value": 8.0, "base": 2.0 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": 3.0 })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/matrices/evaluate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": -2.0 })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let log = client
        .evaluate_logarithm(&LogarithmRequest {
            function: LogFunction::Log,
            value: 8.0,
            base: Some(2.0),
        })
        .await
        .unwrap();
    assert_eq!(log.result, 3.0);

    let det = client
        .evaluate_matrix(&MatrixRequest {
            operation: MatrixOperation::Determinant,
            matrix1: vec![vec![1.0, 2.0], vec![3.0, 4.0]],
            matrix2: None,
        })
        .await
        .unwrap();
    assert!(matches!(det.result, MatrixResult::Scalar(v) if v == -2.0));
}

#[tokio::test]
async fn health_check_round_trips() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "version": "1.0.0",
            "service": "calculator-api"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let health = client.check_health().await.unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.service, "calculator-api");
}

// === Error classification ===

#[tokio::test]
async fn service_detail_string_becomes_status_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/arithmetic/evaluate"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "detail": "Division by zero" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .evaluate(&EvalRequest::Arithmetic {
            expression: "5 / 0".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 400, .. }));
    assert_eq!(err.to_string(), "Division by zero");
}

#[tokio::test]
async fn validation_array_first_message_wins() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/arithmetic/evaluate"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [
                { "loc": ["body", "expression"], "msg": "Invalid expression", "type": "value_error" }
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .evaluate_arithmetic(&ArithmeticRequest {
            expression: "2 +".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid expression");
    assert_eq!(err.status(), Some(422));
}

#[tokio::test]
async fn bodyless_failure_falls_back_to_status_line() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/arithmetic/evaluate"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .evaluate_arithmetic(&ArithmeticRequest {
            expression: "2 + 3".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Request failed with status 500");
}

#[tokio::test]
async fn health_failure_uses_plain_status_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({ "detail": "down" })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.check_health().await.unwrap_err();
    // GET errors skip detail extraction, as the front-end always did.
    assert_eq!(err.to_string(), "Request failed with status 503");
}

#[tokio::test]
async fn connection_refused_classifies_as_network() {
    // Bind a port, then free it so the connect attempt is refused.
    let server = MockServer::start().await;
    let url = server.uri();
    drop(server);

    let client = ApiClient::new(url).unwrap();
    let err = client
        .evaluate(&EvalRequest::Arithmetic {
            expression: "1 + 1".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(
        err.to_string(),
        "Network error. Please check your connection and try again."
    );
}

#[tokio::test]
async fn slow_service_classifies_as_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/arithmetic/evaluate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "result": 5.0, "expression": "2 + 3" }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = ApiClient::with_timeout(server.uri(), Duration::from_millis(200)).unwrap();
    let err = client
        .evaluate_arithmetic(&ArithmeticRequest {
            expression: "2 + 3".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Timeout(_)));
    assert_eq!(err.to_string(), "Request timeout. Please try again.");
}

#[tokio::test]
async fn undecodable_success_body_is_unexpected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/arithmetic/evaluate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .evaluate_arithmetic(&ArithmeticRequest {
            expression: "2 + 3".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Unexpected(_)));
}
