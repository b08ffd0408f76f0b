//! Gateway behavior against a local stub of the backend.

use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use taxui_net::{HttpGateway, NetError};
use taxui_widgets::{CompanyGateway, CompanyOutcome, FormFlavor, YearSource};

#[derive(Deserialize)]
struct YearQuery {
    association_id: String,
}

/// Year endpoint stub: honors the AJAX header contract and keys behavior on
/// the association id so one router covers every scenario.
async fn years(headers: HeaderMap, Query(query): Query<YearQuery>) -> impl IntoResponse {
    let is_ajax = headers
        .get("x-requested-with")
        .map(|v| v == "XMLHttpRequest")
        .unwrap_or(false);
    if !is_ajax {
        return (StatusCode::BAD_REQUEST, "expected XMLHttpRequest").into_response();
    }

    match query.association_id.as_str() {
        "7" => Json(json!(["2022", "2023"])).into_response(),
        // a serializer that leaves years as integers
        "8" => Json(json!([2021, 2022])).into_response(),
        "500" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        "junk" => "this is not json".into_response(),
        _ => Json(json!([])).into_response(),
    }
}

async fn create_company(mut multipart: axum::extract::Multipart) -> impl IntoResponse {
    let mut name = String::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("name") {
            name = field.text().await.unwrap_or_default();
        }
    }
    if name.is_empty() {
        Json(json!({"success": false, "message": "This field is required."}))
    } else {
        Json(json!({"success": true, "id": 12, "name": name}))
    }
}

async fn spawn_stub() -> String {
    let app = Router::new()
        .route("/extension-form/", get(years))
        .route("/form-1120h/", get(years))
        .route("/management-companies/create/", post(create_company));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn year_list_round_trip_with_ajax_header() {
    let base = spawn_stub().await;
    let gateway = HttpGateway::new(base).unwrap();

    let years = gateway
        .tax_years(FormFlavor::Extension, "7")
        .await
        .unwrap();
    assert_eq!(years, vec!["2022", "2023"]);
}

#[tokio::test]
async fn numeric_years_are_normalized_to_strings() {
    let base = spawn_stub().await;
    let gateway = HttpGateway::new(base).unwrap();

    let years = gateway.tax_years(FormFlavor::Form1120h, "8").await.unwrap();
    assert_eq!(years, vec!["2021", "2022"]);
}

#[tokio::test]
async fn unknown_association_yields_empty_list() {
    let base = spawn_stub().await;
    let gateway = HttpGateway::new(base).unwrap();

    let years = gateway.tax_years(FormFlavor::Extension, "42").await.unwrap();
    assert!(years.is_empty());
}

#[tokio::test]
async fn server_error_surfaces_status() {
    let base = spawn_stub().await;
    let gateway = HttpGateway::new(base).unwrap();

    let err = gateway
        .tax_years(FormFlavor::Extension, "500")
        .await
        .unwrap_err();
    let net_err = err.downcast::<NetError>().unwrap();
    assert!(matches!(net_err, NetError::Http { status: 500, .. }));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let base = spawn_stub().await;
    let gateway = HttpGateway::new(base).unwrap();

    let err = gateway
        .tax_years(FormFlavor::Extension, "junk")
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast::<NetError>().unwrap(),
        NetError::Decode { .. }
    ));
}

#[tokio::test]
async fn company_creation_round_trip() {
    let base = spawn_stub().await;
    let gateway = HttpGateway::new(base).unwrap();

    let outcome = gateway
        .create_company(&[("name".to_string(), "Summit Property Group".to_string())])
        .await
        .unwrap();
    assert_eq!(
        outcome,
        CompanyOutcome::Created {
            id: "12".into(),
            name: "Summit Property Group".into()
        }
    );

    let rejected = gateway.create_company(&[]).await.unwrap();
    assert_eq!(
        rejected,
        CompanyOutcome::Rejected {
            message: "This field is required.".into()
        }
    );
}
