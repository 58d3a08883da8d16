//! REST integration test macro for storage backends.
//!
//! The `rest_integration_tests!` macro generates HTTP-level tests that drive
//! the appointment API through full round-trips on a given backend.
//!
//! # Generated Tests
//!
//! ## Create
//! - `test_rest_create`: POST 201, normalized fields, `pending`
//! - `test_rest_create_missing_fields`: POST {} → 400 with per-field details
//! - `test_rest_create_past_date`: 400 on `scheduledDate`
//! - `test_rest_create_malformed_body`: 400 `INVALID_BODY`
//! - `test_rest_create_wrong_types`: non-string fields → 400 with field details
//! - `test_rest_create_non_object_body`: 400 `INVALID_BODY`
//!
//! ## Lifecycle
//! - `test_rest_confirm_twice`: 200 then 409
//! - `test_rest_cancel_twice_keeps_last_reason`
//! - `test_rest_cancel_without_body`
//! - `test_rest_confirm_cancelled`: 409, record unchanged
//! - `test_rest_complete`
//!
//! ## Queries
//! - `test_rest_get` / `test_rest_error_not_found` / `test_rest_error_invalid_uuid`
//! - `test_rest_list_status_filter`: only pending, latest date first
//! - `test_rest_list_search`
//! - `test_rest_list_pagination`
//! - `test_rest_list_invalid_status`
//! - `test_rest_upcoming`
//! - `test_rest_upcoming_huge_days`: window past the latest date → 400

/// Generate a REST integration test suite for a storage backend.
///
/// `$data_factory` must produce an `impl DataService<Appointment> + 'static`.
#[macro_export]
macro_rules! rest_integration_tests {
    ($data_factory:expr) => {
        mod rest_integration_tests {
            use super::*;
            use axum::http::StatusCode;
            use axum_test::TestServer;
            use serde_json::{Value, json};

            async fn make_server() -> TestServer {
                let router = storage_harness::integration::build_test_router($data_factory);
                TestServer::new(router)
            }

            async fn create(server: &TestServer, name: &str, days_ahead: i64) -> Value {
                let response = server
                    .post("/api/appointments")
                    .json(&booking_json(name, days_ahead))
                    .await;
                response.assert_status(StatusCode::CREATED);
                response.json()
            }

            fn id_of(body: &Value) -> String {
                body["id"].as_str().unwrap().to_string()
            }

            fn field_names(body: &Value) -> Vec<String> {
                body["details"]["fields"]
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|f| f["field"].as_str().unwrap().to_string())
                    .collect()
            }

            // ==============================================================
            // Create
            // ==============================================================

            #[tokio::test]
            async fn test_rest_create() {
                let server = make_server().await;
                let mut request = booking_json("  Ana Silva  ", 2);
                request["email"] = json!("ANA@X.COM");
                request["documentId"] = json!("   ");

                let response = server.post("/api/appointments").json(&request).await;
                response.assert_status(StatusCode::CREATED);

                let body: Value = response.json();
                assert_eq!(body["clientName"], "Ana Silva");
                assert_eq!(body["email"], "ana@x.com");
                assert_eq!(body["status"], "pending");
                assert_eq!(body["serviceType"], "Emissão de RG");
                assert_eq!(body["notes"], "");
                assert!(body["documentId"].is_null());
                uuid::Uuid::parse_str(body["id"].as_str().unwrap()).unwrap();
            }

            #[tokio::test]
            async fn test_rest_create_missing_fields() {
                let server = make_server().await;

                let response = server.post("/api/appointments").json(&json!({})).await;
                response.assert_status(StatusCode::BAD_REQUEST);

                let body: Value = response.json();
                assert_eq!(body["code"], "VALIDATION_ERROR");
                assert_eq!(
                    field_names(&body),
                    vec![
                        "clientName",
                        "email",
                        "phone",
                        "serviceType",
                        "scheduledDate",
                        "scheduledTime"
                    ]
                );
            }

            #[tokio::test]
            async fn test_rest_create_past_date() {
                let server = make_server().await;

                let response = server
                    .post("/api/appointments")
                    .json(&booking_json("Ana Silva", -1))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);

                let body: Value = response.json();
                assert_eq!(field_names(&body), vec!["scheduledDate"]);

                let list: Value = server.get("/api/appointments").await.json();
                assert_eq!(list["pagination"]["total"], 0);
            }

            #[tokio::test]
            async fn test_rest_create_malformed_body() {
                let server = make_server().await;

                let response = server
                    .post("/api/appointments")
                    .text("{not json")
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);

                let body: Value = response.json();
                assert_eq!(body["code"], "INVALID_BODY");
            }

            #[tokio::test]
            async fn test_rest_create_wrong_types() {
                let server = make_server().await;
                let mut request = booking_json("Ana Silva", 2);
                request["clientName"] = json!(42);
                request["scheduledDate"] = json!(20301010);

                let response = server.post("/api/appointments").json(&request).await;
                response.assert_status(StatusCode::BAD_REQUEST);

                let body: Value = response.json();
                assert_eq!(body["code"], "VALIDATION_ERROR");
                assert_eq!(field_names(&body), vec!["clientName", "scheduledDate"]);
            }

            #[tokio::test]
            async fn test_rest_create_non_object_body() {
                let server = make_server().await;

                let response = server.post("/api/appointments").json(&json!([1, 2])).await;
                response.assert_status(StatusCode::BAD_REQUEST);

                let body: Value = response.json();
                assert_eq!(body["code"], "INVALID_BODY");
            }

            // ==============================================================
            // Lifecycle
            // ==============================================================

            #[tokio::test]
            async fn test_rest_confirm_twice() {
                let server = make_server().await;
                let created = create(&server, "Ana Silva", 1).await;
                let id = id_of(&created);

                let first = server
                    .patch(&format!("/api/appointments/{}/confirm", id))
                    .await;
                first.assert_status(StatusCode::OK);
                let body: Value = first.json();
                assert_eq!(body["status"], "confirmed");

                let second = server
                    .patch(&format!("/api/appointments/{}/confirm", id))
                    .await;
                second.assert_status(StatusCode::CONFLICT);
                let body: Value = second.json();
                assert_eq!(body["code"], "INVALID_TRANSITION");
                assert_eq!(body["details"]["from"], "confirmed");
                assert_eq!(body["details"]["to"], "confirmed");
            }

            #[tokio::test]
            async fn test_rest_cancel_twice_keeps_last_reason() {
                let server = make_server().await;
                let id = id_of(&create(&server, "Bruno Lima", 3).await);
                let path = format!("/api/appointments/{}/cancel", id);

                server
                    .patch(&path)
                    .json(&json!({ "reason": "sick" }))
                    .await
                    .assert_status(StatusCode::OK);

                let response = server
                    .patch(&path)
                    .json(&json!({ "reason": "travelling" }))
                    .await;
                response.assert_status(StatusCode::OK);

                let body: Value = response.json();
                assert_eq!(body["status"], "cancelled");
                assert_eq!(body["cancellationReason"], "travelling");
                assert!(body["cancelledAt"].is_string());
            }

            #[tokio::test]
            async fn test_rest_cancel_without_body() {
                let server = make_server().await;
                let id = id_of(&create(&server, "Carla Dias", 3).await);

                let response = server
                    .patch(&format!("/api/appointments/{}/cancel", id))
                    .await;
                response.assert_status(StatusCode::OK);

                let body: Value = response.json();
                assert_eq!(body["status"], "cancelled");
                assert_eq!(body["cancellationReason"], "");
            }

            #[tokio::test]
            async fn test_rest_confirm_cancelled() {
                let server = make_server().await;
                let id = id_of(&create(&server, "Davi Rocha", 3).await);

                let cancelled: Value = server
                    .patch(&format!("/api/appointments/{}/cancel", id))
                    .await
                    .json();

                server
                    .patch(&format!("/api/appointments/{}/confirm", id))
                    .await
                    .assert_status(StatusCode::CONFLICT);

                let stored: Value = server
                    .get(&format!("/api/appointments/{}", id))
                    .await
                    .json();
                assert_eq!(stored, cancelled);
            }

            #[tokio::test]
            async fn test_rest_complete() {
                let server = make_server().await;
                let id = id_of(&create(&server, "Elisa Nunes", 2).await);
                let complete = format!("/api/appointments/{}/complete", id);

                server
                    .patch(&complete)
                    .await
                    .assert_status(StatusCode::CONFLICT);

                server
                    .patch(&format!("/api/appointments/{}/confirm", id))
                    .await
                    .assert_status(StatusCode::OK);

                let response = server.patch(&complete).await;
                response.assert_status(StatusCode::OK);
                let body: Value = response.json();
                assert_eq!(body["status"], "completed");

                server
                    .patch(&format!("/api/appointments/{}/cancel", id))
                    .await
                    .assert_status(StatusCode::CONFLICT);
            }

            // ==============================================================
            // Queries
            // ==============================================================

            #[tokio::test]
            async fn test_rest_get() {
                let server = make_server().await;
                let created = create(&server, "Ana Silva", 5).await;
                let id = id_of(&created);

                let response = server.get(&format!("/api/appointments/{}", id)).await;
                response.assert_status(StatusCode::OK);

                let body: Value = response.json();
                assert_eq!(body, created);
            }

            #[tokio::test]
            async fn test_rest_error_not_found() {
                let server = make_server().await;
                let random_id = uuid::Uuid::new_v4();

                let response = server
                    .get(&format!("/api/appointments/{}", random_id))
                    .await;
                response.assert_status(StatusCode::NOT_FOUND);

                let body: Value = response.json();
                assert_eq!(body["code"], "APPOINTMENT_NOT_FOUND");
                assert_eq!(body["details"]["id"], random_id.to_string());

                server
                    .patch(&format!("/api/appointments/{}/confirm", random_id))
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
            }

            #[tokio::test]
            async fn test_rest_error_invalid_uuid() {
                let server = make_server().await;

                let response = server.get("/api/appointments/not-a-uuid").await;
                response.assert_status(StatusCode::BAD_REQUEST);

                let body: Value = response.json();
                assert_eq!(body["code"], "INVALID_ENTITY_ID");
            }

            #[tokio::test]
            async fn test_rest_list_status_filter() {
                let server = make_server().await;
                let near = id_of(&create(&server, "Ana Silva", 2).await);
                let far = id_of(&create(&server, "Bruno Lima", 20).await);
                let confirmed = id_of(&create(&server, "Carla Dias", 10).await);
                server
                    .patch(&format!("/api/appointments/{}/confirm", confirmed))
                    .await
                    .assert_status(StatusCode::OK);

                let response = server
                    .get("/api/appointments")
                    .add_query_param("status", "pending")
                    .await;
                response.assert_status(StatusCode::OK);

                let body: Value = response.json();
                let ids: Vec<&str> = body["data"]
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|a| a["id"].as_str().unwrap())
                    .collect();
                assert_eq!(ids, vec![far.as_str(), near.as_str()]);
                assert_eq!(body["pagination"]["total"], 2);

                let all: Value = server
                    .get("/api/appointments")
                    .add_query_param("status", "all")
                    .await
                    .json();
                assert_eq!(all["pagination"]["total"], 3);
            }

            #[tokio::test]
            async fn test_rest_list_search() {
                let server = make_server().await;
                create(&server, "Ana Silva", 2).await;
                create(&server, "Bruno Lima", 3).await;

                let body: Value = server
                    .get("/api/appointments")
                    .add_query_param("search", "SILVA")
                    .await
                    .json();

                let data = body["data"].as_array().unwrap();
                assert_eq!(data.len(), 1);
                assert_eq!(data[0]["clientName"], "Ana Silva");
            }

            #[tokio::test]
            async fn test_rest_list_pagination() {
                let server = make_server().await;
                for day in 1..=5 {
                    create(&server, &format!("Cliente {}", day), day).await;
                }

                let body: Value = server
                    .get("/api/appointments")
                    .add_query_param("page", 2)
                    .add_query_param("limit", 2)
                    .await
                    .json();

                assert_eq!(body["data"].as_array().unwrap().len(), 2);
                assert_eq!(body["data"][0]["clientName"], "Cliente 3");
                assert_eq!(body["pagination"]["page"], 2);
                assert_eq!(body["pagination"]["total"], 5);
                assert_eq!(body["pagination"]["totalPages"], 3);
                assert_eq!(body["pagination"]["hasNext"], true);
                assert_eq!(body["pagination"]["hasPrev"], true);
            }

            #[tokio::test]
            async fn test_rest_list_invalid_status() {
                let server = make_server().await;

                let response = server
                    .get("/api/appointments")
                    .add_query_param("status", "archived")
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);

                let body: Value = response.json();
                assert_eq!(body["code"], "INVALID_QUERY");
            }

            #[tokio::test]
            async fn test_rest_upcoming() {
                let server = make_server().await;
                let later = id_of(&create(&server, "Ana Silva", 3).await);
                let sooner = id_of(&create(&server, "Bruno Lima", 1).await);
                create(&server, "Carla Dias", 15).await;
                let cancelled = id_of(&create(&server, "Davi Rocha", 2).await);
                server
                    .patch(&format!("/api/appointments/{}/cancel", cancelled))
                    .await
                    .assert_status(StatusCode::OK);

                let response = server.get("/api/appointments/upcoming").await;
                response.assert_status(StatusCode::OK);

                let body: Value = response.json();
                assert_eq!(body["days"], 7);
                assert_eq!(body["count"], 2);
                assert_eq!(body["data"][0]["id"], sooner);
                assert_eq!(body["data"][1]["id"], later);

                let wide: Value = server
                    .get("/api/appointments/upcoming")
                    .add_query_param("days", 30)
                    .await
                    .json();
                assert_eq!(wide["count"], 3);
            }

            #[tokio::test]
            async fn test_rest_upcoming_huge_days() {
                let server = make_server().await;
                create(&server, "Ana Silva", 1).await;

                let response = server
                    .get("/api/appointments/upcoming")
                    .add_query_param("days", "4000000000")
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);

                let body: Value = response.json();
                assert_eq!(body["code"], "INVALID_QUERY");
            }
        }
    };
}
