//! Macro-generated test suite for `DataService<Appointment>` contract validation.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use agenda::storage::InMemoryDataService;
//!
//! data_service_tests!(InMemoryDataService::<Appointment>::new());
//! ```
//!
//! # Generated Tests
//!
//! - `test_create_and_get`: create then retrieve, every field survives
//! - `test_get_nonexistent`: random UUID returns None
//! - `test_list_empty` / `test_list_multiple`
//! - `test_update_existing`: a lifecycle change is persisted
//! - `test_update_nonexistent`: returns Err
//! - `test_create_duplicate_id`: second insert with the same id returns Err
//! - `test_concurrent_access`: parallel creates from spawned tasks

/// Generate a `DataService<Appointment>` conformance test suite.
///
/// `$factory` is re-evaluated for each test. For the concurrent access test
/// the service must also implement `Clone + 'static`.
#[macro_export]
macro_rules! data_service_tests {
    ($factory:expr) => {
        mod data_service_contract_tests {
            use super::*;
            use agenda::core::lifecycle;
            use agenda::core::{AppointmentStatus, DataService, Entity};
            use chrono::Utc;
            use uuid::Uuid;

            #[tokio::test]
            async fn test_create_and_get() {
                let service = $factory;
                let appointment = create_test_appointment("Ana Silva", 3);
                let id = appointment.id;

                let created = service.create(appointment.clone()).await.unwrap();
                assert_eq!(created.id(), id);
                assert_eq!(created.status.as_str(), "pending");

                let retrieved = service.get(&id).await.unwrap();
                assert_eq!(retrieved, Some(appointment));
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let service = $factory;

                let result = service.get(&Uuid::new_v4()).await.unwrap();
                assert!(result.is_none(), "Unknown id should return None");
            }

            #[tokio::test]
            async fn test_list_empty() {
                let service = $factory;

                let all = service.list().await.unwrap();
                assert!(all.is_empty(), "List on empty store should be empty");
            }

            #[tokio::test]
            async fn test_list_multiple() {
                let service = $factory;
                let mut expected_ids: Vec<Uuid> = Vec::new();

                for appointment in sample_batch(5) {
                    expected_ids.push(appointment.id);
                    service.create(appointment).await.unwrap();
                }

                let all = service.list().await.unwrap();
                assert_count(&all, 5);
                for id in &expected_ids {
                    assert!(all.iter().any(|a| a.id == *id), "Missing appointment {}", id);
                }
            }

            #[tokio::test]
            async fn test_update_existing() {
                let service = $factory;
                let mut appointment = create_test_appointment("Bruno Lima", 2);
                let id = appointment.id;
                service.create(appointment.clone()).await.unwrap();

                lifecycle::cancel(&mut appointment, "travelling", Utc::now()).unwrap();
                let updated = service.update(&id, appointment).await.unwrap();
                assert_eq!(updated.status, AppointmentStatus::Cancelled);

                let retrieved = service.get(&id).await.unwrap().unwrap();
                assert_eq!(retrieved.status, AppointmentStatus::Cancelled);
                assert_eq!(retrieved.cancellation_reason.as_deref(), Some("travelling"));
                assert!(retrieved.cancelled_at.is_some());
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let service = $factory;
                let appointment = create_test_appointment("Ghost", 1);
                let id = appointment.id;

                let result = service.update(&id, appointment).await;
                assert!(result.is_err(), "Updating an unknown appointment should fail");
            }

            #[tokio::test]
            async fn test_create_duplicate_id() {
                let service = $factory;
                let appointment = create_test_appointment("Carla Dias", 4);

                service.create(appointment.clone()).await.unwrap();
                assert!(service.create(appointment).await.is_err());
                assert_count(&service.list().await.unwrap(), 1);
            }

            #[tokio::test]
            async fn test_concurrent_access() {
                let service = $factory;
                let mut handles = Vec::new();

                for appointment in sample_batch(10) {
                    let service = service.clone();
                    handles.push(tokio::spawn(async move {
                        service.create(appointment).await.unwrap();
                    }));
                }

                for handle in handles {
                    handle.await.unwrap();
                }

                assert_count(&service.list().await.unwrap(), 10);
            }
        }
    };
}
