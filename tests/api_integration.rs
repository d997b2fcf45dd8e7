//! Integration tests for the HTTP API
//!
//! Router built over a baseline-only facade, driven with tower's oneshot.

use aqariy::config::EngineProfile;
use aqariy::core::{create_router, ValuationFacade};
use aqariy::types::Locale;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

fn create_test_router() -> axum::Router {
    create_router(ValuationFacade::new(), Locale::En)
}

fn reference_form() -> Value {
    json!({
        "buildingArea": "120",
        "buildingAge": 5,
        "rooms": "4",
        "bathrooms": 2,
        "floor": "2",
        "paymentMethod": "cash",
        "city": "ramallah",
        "furnished": true
    })
}

async fn post_json(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_router();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], aqariy::VERSION);
    assert_eq!(json["scoring_backend"], Value::Null);
    assert_eq!(json["judgment_enabled"], true);
}

#[tokio::test]
async fn test_estimate_endpoint() {
    let (status, json) = post_json(create_test_router(), "/estimate", reference_form()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["estimate"], 268155.0);
    assert_eq!(json["formatted_price"], "268,155");
    assert_eq!(json["source"], "baseline");
    assert_eq!(json["factors"][0]["name"], "city_market");
    assert_eq!(json["factors"][0]["impact"], "+10.00%");
    assert!(json["computed_at"].is_string());
}

#[tokio::test]
async fn test_estimate_endpoint_arabic() {
    let mut body = reference_form();
    body["lang"] = json!("ar");
    let (status, json) = post_json(create_test_router(), "/estimate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["formatted_price"], "٢٦٨٬١٥٥");
    assert_eq!(json["factors"][0]["label"], "المدينة");
}

#[tokio::test]
async fn test_estimate_reports_defaulted_fields() {
    let (status, json) = post_json(create_test_router(), "/estimate", json!({ "buildingArea": "100" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["low_confidence"],
        json!(["building_age", "rooms", "bathrooms", "floor"])
    );
}

#[tokio::test]
async fn test_estimate_endpoint_huge_area() {
    let (status, json) = post_json(
        create_test_router(),
        "/estimate",
        json!({ "buildingArea": "1e306", "lang": "ar" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["estimate"], 0.0);
    assert_eq!(json["formatted_price"], "٠");
    assert_eq!(json["low_confidence"][0], "building_area");
}

#[tokio::test]
async fn test_judge_endpoint() {
    let mut body = reference_form();
    body["listed_price"] = json!(402232.5);
    let (status, json) = post_json(create_test_router(), "/judge", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["judgment"]["category"], "OVERPRICED");
    assert_eq!(json["judgment"]["deviation"], 0.5);
    assert_eq!(json["color"], "#d9534f");
    assert_eq!(json["formatted_listed_price"], "402,233");
    assert!(json["message"].as_str().unwrap().contains("overpriced"));
}

#[tokio::test]
async fn test_judge_endpoint_accepts_text_price() {
    let mut body = reference_form();
    body["listed_price"] = json!("147485");
    let (status, json) = post_json(create_test_router(), "/judge", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["judgment"]["category"], "SUSPICIOUSLY_UNDERPRICED");
}

#[tokio::test]
async fn test_judge_endpoint_rejects_invalid_price() {
    for price in [json!(0), json!(-100), json!("abc"), Value::Null] {
        let mut body = reference_form();
        body["listed_price"] = price.clone();
        let (status, json) = post_json(create_test_router(), "/judge", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "price {}", price);
        assert_eq!(json["error"], "Please enter a valid price.");
    }
}

#[tokio::test]
async fn test_judge_endpoint_zero_area() {
    let mut body = reference_form();
    body["buildingArea"] = json!("");
    body["listed_price"] = json!(100000);
    let (status, json) = post_json(create_test_router(), "/judge", body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "Could not get analysis.");
}

#[tokio::test]
async fn test_judge_disabled_by_profile() {
    let facade = ValuationFacade::new().with_profile(EngineProfile {
        elevator: true,
        judgment: false,
    });
    let mut body = reference_form();
    body["listed_price"] = json!(100000);
    let (status, _) = post_json(create_router(facade, Locale::En), "/judge", body).await;

    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
}

#[tokio::test]
async fn test_predict_contract() {
    let payload = json!({
        "عدد_الغرف": 4,
        "عدد_الحمامات": 2,
        "مفروشة": 1,
        "مساحة_البناء": 120,
        "الطابق": 2,
        "عمر_البناء": 5,
        "العقار_مرهون": 0,
        "طريقة_الدفع": 0,
        "موقف_سيارات": 0,
        "المدينة": "رام الله"
    });
    let (status, json) = post_json(create_test_router(), "/predict", payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["predicted_price"], 268155.0);
    assert_eq!(json["factors"]["furnished"], 8.0);
    assert_eq!(json["factors"]["cash_payment"], -5.0);
}

#[tokio::test]
async fn test_judge_price_contract() {
    let request = json!({
        "عدد_الغرف": 4,
        "عدد_الحمامات": 2,
        "مفروشة": 1,
        "مساحة_البناء": 120,
        "الطابق": 2,
        "عمر_البناء": 5,
        "العقار_مرهون": 0,
        "طريقة_الدفع": 0,
        "المدينة": "رام الله",
        "listed_price": 147485.25
    });
    let (status, json) = post_json(create_test_router(), "/judge_price", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "judgment_key": "SUSPICIOUSLY_UNDERPRICED" }));
}
