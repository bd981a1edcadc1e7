// src/services/employee_store_tests.rs
//
// EmployeeStore behaviour against a mocked transport and an in-memory server.
//
// INVARIANTS TESTED:
// - Validation failures never reach the transport
// - Transport failures never touch the local collection
// - After any successful CRUD sequence the local ids equal the server's ids
// - Every outcome produces exactly one notification

#[cfg(test)]
mod support {
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::collections::BTreeSet;
    use std::sync::{Arc, Mutex};

    use crate::domain::{Employee, EmployeeId, EmployeePayload, UpdateEmployeeValues};
    use crate::error::TransportFailure;
    use crate::events::EventBus;
    use crate::integrations::api::{RemoteClient, StaticToken};
    use crate::services::{EmployeeStore, NotificationCenter};

    pub const TOKEN: &str = "token-123";

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn employee(id: EmployeeId, name: &str) -> Employee {
        Employee {
            id,
            name: name.to_string(),
            email: format!("{}@empresa.com", name.to_lowercase()),
            sector: "RH".to_string(),
            birthday_date: date(1990, 5, 17),
            admission_date: date(2019, 1, 2),
            office: "Analista".to_string(),
            level: "Pleno".to_string(),
        }
    }

    pub fn valid_values(name: &str) -> UpdateEmployeeValues {
        UpdateEmployeeValues {
            name: name.to_string(),
            email: format!("{}@empresa.com", name.to_lowercase()),
            sector: "TI".to_string(),
            birthday_date: "1990-05-17".to_string(),
            admission_date: "2019-01-02".to_string(),
            office: "Desenvolvedor".to_string(),
            level: "Sênior".to_string(),
        }
    }

    pub fn from_payload(id: EmployeeId, payload: &EmployeePayload) -> Employee {
        Employee {
            id,
            name: payload.name.clone(),
            email: payload.email.clone(),
            sector: payload.sector.clone(),
            birthday_date: payload.birthday_date,
            admission_date: payload.admission_date,
            office: payload.office.clone(),
            level: payload.level.clone(),
        }
    }

    pub struct Harness {
        pub store: Arc<EmployeeStore>,
        pub notifications: NotificationCenter,
        pub event_bus: Arc<EventBus>,
    }

    pub fn harness(remote: Arc<dyn RemoteClient>) -> Harness {
        let event_bus = Arc::new(EventBus::new());
        let notifications = NotificationCenter::new(Arc::clone(&event_bus));
        let store = EmployeeStore::new(
            remote,
            Arc::new(StaticToken::new(TOKEN)),
            notifications.clone(),
            Arc::clone(&event_bus),
        );

        Harness {
            store: Arc::new(store),
            notifications,
            event_bus,
        }
    }

    pub fn ids(employees: &[Employee]) -> BTreeSet<EmployeeId> {
        employees.iter().map(|e| e.id).collect()
    }

    /// In-memory stand-in for the employees service.
    #[derive(Default)]
    pub struct FakeServer {
        rows: Mutex<Vec<Employee>>,
        next_id: Mutex<EmployeeId>,
    }

    impl FakeServer {
        pub fn with(rows: Vec<Employee>) -> Self {
            let next = rows.iter().map(|e| e.id).max().unwrap_or(0) + 1;
            Self {
                rows: Mutex::new(rows),
                next_id: Mutex::new(next),
            }
        }

        /// Creation happens outside the store, like the "add employee" modal.
        pub fn create(&self, name: &str) -> Employee {
            let id = {
                let mut next = self.next_id.lock().unwrap();
                let id = *next;
                *next += 1;
                id
            };
            let created = employee(id, name);
            self.rows.lock().unwrap().push(created.clone());
            created
        }

        pub fn rows(&self) -> Vec<Employee> {
            self.rows.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RemoteClient for FakeServer {
        async fn list_employees(&self, _token: &str) -> Result<Vec<Employee>, TransportFailure> {
            tokio::task::yield_now().await;
            Ok(self.rows())
        }

        async fn update_employee(
            &self,
            _token: &str,
            employee_id: EmployeeId,
            payload: &EmployeePayload,
        ) -> Result<Employee, TransportFailure> {
            tokio::task::yield_now().await;
            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .iter_mut()
                .find(|e| e.id == employee_id)
                .ok_or(TransportFailure::Status {
                    status: 404,
                    body: "not found".to_string(),
                })?;
            *row = from_payload(employee_id, payload);
            Ok(row.clone())
        }

        async fn delete_employee(
            &self,
            _token: &str,
            employee_id: EmployeeId,
        ) -> Result<(), TransportFailure> {
            tokio::task::yield_now().await;
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|e| e.id != employee_id);
            if rows.len() == before {
                return Err(TransportFailure::Status {
                    status: 404,
                    body: "not found".to_string(),
                });
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod load_tests {
    use super::support::*;
    use std::sync::Arc;

    use crate::domain::NotificationKind;
    use crate::error::{StoreError, TransportFailure};
    use crate::integrations::api::MockRemoteClient;
    use crate::services::messages;

    #[tokio::test]
    async fn test_load_replaces_collection() {
        let server = Arc::new(FakeServer::with(vec![employee(1, "Alice"), employee(2, "Bob")]));
        let h = harness(server.clone());
        h.store.add_local(employee(99, "Stale"));

        h.store.load().await.unwrap();

        assert_eq!(h.store.employees(), server.rows());
        assert!(h.store.find(99).is_none());
        assert!(h.notifications.is_empty());
    }

    #[tokio::test]
    async fn test_load_failure_keeps_stale_collection() {
        let mut remote = MockRemoteClient::new();
        remote
            .expect_list_employees()
            .times(1)
            .returning(|_| Err(TransportFailure::Unreachable("connection refused".into())));
        let h = harness(Arc::new(remote));
        h.store.add_local(employee(1, "Alice"));

        let result = h.store.load().await;

        assert!(matches!(result, Err(StoreError::Transport(_))));
        assert_eq!(h.store.employees(), vec![employee(1, "Alice")]);

        let toasts = h.notifications.snapshot();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, NotificationKind::Error);
        assert_eq!(toasts[0].title, messages::LOAD_FAILED_TITLE);
        assert_eq!(
            toasts[0].description.as_deref(),
            Some(messages::LOAD_FAILED_DESCRIPTION)
        );
    }

    #[tokio::test]
    async fn test_load_sends_current_token() {
        let mut remote = MockRemoteClient::new();
        remote
            .expect_list_employees()
            .withf(|token| token.to_string() == TOKEN)
            .times(1)
            .returning(|_| Ok(Vec::new()));
        let h = harness(Arc::new(remote));

        h.store.load().await.unwrap();
        assert!(h.store.is_empty());
    }
}

#[cfg(test)]
mod delete_tests {
    use super::support::*;
    use std::sync::Arc;

    use crate::domain::NotificationKind;
    use crate::error::{StoreError, TransportFailure};
    use crate::integrations::api::MockRemoteClient;
    use crate::services::messages;

    #[tokio::test]
    async fn test_load_then_delete_empties_collection() {
        let server = Arc::new(FakeServer::with(vec![employee(1, "Alice")]));
        let h = harness(server.clone());

        h.store.load().await.unwrap();
        assert_eq!(h.store.len(), 1);

        h.store.delete(1, "Alice").await.unwrap();

        assert!(h.store.is_empty());
        assert!(server.rows().is_empty());

        let toasts = h.notifications.snapshot();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, NotificationKind::Success);
        assert_eq!(toasts[0].title, messages::DELETE_SUCCEEDED_TITLE);
        assert!(toasts[0].description.as_deref().unwrap().contains("Alice"));
    }

    #[tokio::test]
    async fn test_delete_failure_leaves_collection() {
        let mut remote = MockRemoteClient::new();
        remote
            .expect_delete_employee()
            .times(1)
            .returning(|_, _| {
                Err(TransportFailure::Status {
                    status: 500,
                    body: "{\"message\":\"boom\"}".into(),
                })
            });
        let h = harness(Arc::new(remote));
        h.store.replace_all(vec![employee(1, "Alice"), employee(2, "Bob")]);

        let result = h.store.delete(2, "Bob").await;

        assert!(matches!(result, Err(StoreError::Transport(_))));
        assert_eq!(h.store.len(), 2);

        let toasts = h.notifications.snapshot();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, NotificationKind::Error);
        assert_eq!(toasts[0].title, messages::DELETE_FAILED_TITLE);

        // Server body never reaches the operator
        let description = toasts[0].description.clone().unwrap();
        assert!(description.contains("Bob"));
        assert!(!description.contains("boom"));
    }
}

#[cfg(test)]
mod update_tests {
    use super::support::*;
    use std::sync::Arc;

    use crate::domain::{DateNormalization, NotificationKind, UpdateEmployeeValues};
    use crate::error::{StoreError, TransportFailure};
    use crate::events::{EmployeeCollectionChanged, EmployeeUpdated};
    use crate::integrations::api::MockRemoteClient;
    use crate::services::messages;

    #[tokio::test]
    async fn test_invalid_email_never_reaches_server() {
        let mut remote = MockRemoteClient::new();
        remote.expect_update_employee().never();
        let h = harness(Arc::new(remote));
        h.store.add_local(employee(1, "Alice"));

        let values = UpdateEmployeeValues {
            email: "not-an-email".to_string(),
            ..valid_values("Alice")
        };
        let result = h.store.update(1, values).await;

        let errors = match result {
            Err(StoreError::Validation(errors)) => errors,
            other => panic!("expected validation failure, got {:?}", other),
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("email"), Some("Digite um e-mail válido"));

        assert_eq!(h.store.find(1), Some(employee(1, "Alice")));

        let toasts = h.notifications.snapshot();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, NotificationKind::Error);
        assert_eq!(toasts[0].title, messages::UPDATE_INVALID_TITLE);
    }

    #[tokio::test]
    async fn test_missing_fields_are_exactly_reported() {
        let mut remote = MockRemoteClient::new();
        remote.expect_update_employee().never();
        let h = harness(Arc::new(remote));

        let values = UpdateEmployeeValues {
            name: String::new(),
            level: String::new(),
            birthday_date: String::new(),
            ..valid_values("Alice")
        };
        let errors = match h.store.update(1, values).await {
            Err(StoreError::Validation(errors)) => errors,
            other => panic!("expected validation failure, got {:?}", other),
        };

        let paths: Vec<&str> = errors.paths().collect();
        assert_eq!(paths, vec!["birthday_date", "level", "name"]);
        assert_eq!(errors.get("birthday_date"), Some("Aniversário obrigatório"));
    }

    #[tokio::test]
    async fn test_dates_are_shifted_one_day_across_boundaries() {
        let mut remote = MockRemoteClient::new();
        remote
            .expect_update_employee()
            .withf(|token, id, payload| {
                token.to_string() == TOKEN
                    && *id == 1
                    && payload.birthday_date == date(2020, 3, 1)
                    && payload.admission_date == date(2022, 1, 1)
            })
            .times(1)
            .returning(|_, id, payload| Ok(from_payload(id, payload)));
        let h = harness(Arc::new(remote));
        h.store.add_local(employee(1, "Alice"));

        let values = UpdateEmployeeValues {
            birthday_date: "2020-02-29".to_string(),
            admission_date: "2021-12-31".to_string(),
            ..valid_values("Alice")
        };
        h.store.update(1, values).await.unwrap();

        let stored = h.store.find(1).unwrap();
        assert_eq!(stored.birthday_date, date(2020, 3, 1));
        assert_eq!(stored.admission_date, date(2022, 1, 1));
    }

    #[tokio::test]
    async fn test_as_entered_policy_sends_typed_dates() {
        let mut remote = MockRemoteClient::new();
        remote
            .expect_update_employee()
            .withf(|_, _, payload| {
                payload.birthday_date == date(2020, 2, 29)
                    && payload.admission_date == date(2021, 1, 31)
            })
            .times(1)
            .returning(|_, id, payload| Ok(from_payload(id, payload)));

        let event_bus = Arc::new(crate::events::EventBus::new());
        let notifications = crate::services::NotificationCenter::new(Arc::clone(&event_bus));
        let store = crate::services::EmployeeStore::new(
            Arc::new(remote),
            Arc::new(crate::integrations::api::StaticToken::new(TOKEN)),
            notifications,
            event_bus,
        )
        .with_date_normalization(DateNormalization::AsEntered);

        let values = UpdateEmployeeValues {
            birthday_date: "2020-02-29".to_string(),
            admission_date: "2021-01-31".to_string(),
            ..valid_values("Alice")
        };
        store.update(1, values).await.unwrap();
    }

    #[tokio::test]
    async fn test_success_replaces_with_server_representation() {
        let server = Arc::new(FakeServer::with(vec![employee(1, "Alice"), employee(2, "Bob")]));
        let h = harness(server.clone());
        h.store.load().await.unwrap();

        h.store.update(2, valid_values("Roberto")).await.unwrap();

        let updated = h.store.find(2).unwrap();
        assert_eq!(updated.name, "Roberto");
        assert_eq!(updated.office, "Desenvolvedor");
        assert_eq!(h.store.employees(), server.rows());

        let toasts = h.notifications.snapshot();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, NotificationKind::Success);
        assert_eq!(toasts[0].title, messages::UPDATE_SUCCEEDED_TITLE);
    }

    #[tokio::test]
    async fn test_transport_failure_leaves_collection() {
        let mut remote = MockRemoteClient::new();
        remote
            .expect_update_employee()
            .times(1)
            .returning(|_, _, _| Err(TransportFailure::Decode("<html>".into())));
        let h = harness(Arc::new(remote));
        h.store.add_local(employee(1, "Alice"));

        let result = h.store.update(1, valid_values("Alicia")).await;

        assert!(matches!(result, Err(StoreError::Transport(TransportFailure::Decode(_)))));
        assert_eq!(h.store.find(1), Some(employee(1, "Alice")));

        let toasts = h.notifications.snapshot();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].title, messages::UPDATE_FAILED_TITLE);
        assert_ne!(toasts[0].title, messages::UPDATE_INVALID_TITLE);
    }

    #[tokio::test]
    async fn test_update_of_unknown_local_id_writes_nothing() {
        let mut remote = MockRemoteClient::new();
        remote
            .expect_update_employee()
            .times(1)
            .returning(|_, id, payload| Ok(from_payload(id, payload)));
        let h = harness(Arc::new(remote));
        h.store.add_local(employee(1, "Alice"));

        let applied = Arc::new(std::sync::Mutex::new(None));
        let seen = Arc::clone(&applied);
        h.event_bus.subscribe::<EmployeeUpdated, _>(move |event| {
            *seen.lock().unwrap() = Some(event.applied_locally);
        });

        h.store.update(42, valid_values("Fantasma")).await.unwrap();

        assert_eq!(h.store.employees(), vec![employee(1, "Alice")]);
        assert_eq!(*applied.lock().unwrap(), Some(false));
    }

    #[tokio::test]
    async fn test_server_answer_cannot_change_id() {
        let mut remote = MockRemoteClient::new();
        remote
            .expect_update_employee()
            .times(1)
            .returning(|_, _, payload| Ok(from_payload(2, payload)));
        let h = harness(Arc::new(remote));
        h.store.replace_all(vec![employee(1, "Alice"), employee(2, "Bob")]);

        h.store.update(1, valid_values("Alicia")).await.unwrap();

        let ids: Vec<_> = h.store.employees().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(h.store.find(1).unwrap().name, "Alicia");
        assert_eq!(h.store.find(2).unwrap().name, "Bob");
    }

    #[tokio::test]
    async fn test_change_event_carries_snapshot() {
        let server = Arc::new(FakeServer::with(vec![employee(1, "Alice")]));
        let h = harness(server);
        h.store.load().await.unwrap();

        let last = Arc::new(std::sync::Mutex::new(Vec::new()));
        let seen = Arc::clone(&last);
        h.event_bus.subscribe::<EmployeeCollectionChanged, _>(move |event| {
            *seen.lock().unwrap() = event.snapshot.clone();
        });

        h.store.update(1, valid_values("Alicia")).await.unwrap();

        let snapshot = last.lock().unwrap().clone();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].name, "Alicia");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_updates_on_different_ids() {
        let server = Arc::new(FakeServer::with(vec![employee(1, "Alice"), employee(2, "Bob")]));
        let h = harness(server.clone());
        h.store.load().await.unwrap();

        let first = {
            let store = Arc::clone(&h.store);
            tokio::spawn(async move { store.update(1, valid_values("Alicia")).await })
        };
        let second = {
            let store = Arc::clone(&h.store);
            tokio::spawn(async move { store.update(2, valid_values("Roberto")).await })
        };

        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();

        assert_eq!(h.store.find(1).unwrap().name, "Alicia");
        assert_eq!(h.store.find(2).unwrap().name, "Roberto");

        let successes: Vec<_> = h
            .notifications
            .snapshot()
            .into_iter()
            .filter(|n| n.title == messages::UPDATE_SUCCEEDED_TITLE)
            .collect();
        assert_eq!(successes.len(), 2);
        assert_ne!(successes[0].id, successes[1].id);
    }
}

#[cfg(test)]
mod consistency_tests {
    use super::support::*;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::error::{StoreError, TransportFailure};
    use crate::events::EventBus;
    use crate::integrations::api::{MockRemoteClient, SessionToken};
    use crate::services::{EmployeeStore, NotificationCenter};

    #[tokio::test]
    async fn test_crud_sequence_keeps_ids_in_sync() {
        let server = Arc::new(FakeServer::with(vec![
            employee(1, "Alice"),
            employee(2, "Bob"),
            employee(3, "Carla"),
        ]));
        let h = harness(server.clone());

        h.store.load().await.unwrap();
        assert_eq!(ids(&h.store.employees()), ids(&server.rows()));

        let created = server.create("Daniel");
        h.store.add_local(created.clone());
        h.store.add_local(created);
        assert_eq!(ids(&h.store.employees()), ids(&server.rows()));

        h.store.update(2, valid_values("Roberto")).await.unwrap();
        assert_eq!(ids(&h.store.employees()), ids(&server.rows()));

        h.store.delete(1, "Alice").await.unwrap();
        h.store.delete(4, "Daniel").await.unwrap();
        assert_eq!(ids(&h.store.employees()), ids(&server.rows()));

        // A failed delete changes neither side
        assert!(h.store.delete(1, "Alice").await.is_err());
        assert_eq!(ids(&h.store.employees()), ids(&server.rows()));

        h.store.load().await.unwrap();
        assert_eq!(h.store.employees(), server.rows());
    }

    #[tokio::test]
    async fn test_missing_credential_skips_transport() {
        let mut remote = MockRemoteClient::new();
        remote.expect_list_employees().never();
        remote.expect_delete_employee().never();
        remote.expect_update_employee().never();

        let event_bus = Arc::new(EventBus::new());
        let notifications = NotificationCenter::new(Arc::clone(&event_bus));
        let store = EmployeeStore::new(
            Arc::new(remote),
            Arc::new(SessionToken::new(None)),
            notifications.clone(),
            event_bus,
        );

        let missing = Err(StoreError::Transport(TransportFailure::MissingCredential));
        assert_eq!(store.load().await, missing);
        assert_eq!(store.delete(1, "Alice").await, missing);
        assert_eq!(store.update(1, valid_values("Alice")).await, missing);
        assert_eq!(notifications.len(), 3);
    }

    #[tokio::test]
    async fn test_token_is_read_on_every_call() {
        let mut remote = MockRemoteClient::new();
        let mut sequence = mockall::Sequence::new();
        remote
            .expect_list_employees()
            .withf(|token| token.to_string() == "first")
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_| Ok(Vec::new()));
        remote
            .expect_list_employees()
            .withf(|token| token.to_string() == "second")
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_| Ok(Vec::new()));

        let tokens = Arc::new(SessionToken::new(Some("first".to_string())));
        let event_bus = Arc::new(EventBus::new());
        let store = EmployeeStore::new(
            Arc::new(remote),
            tokens.clone(),
            NotificationCenter::new(Arc::clone(&event_bus)),
            event_bus,
        );

        store.load().await.unwrap();
        tokens.set("second");
        store.load().await.unwrap();
    }

    #[tokio::test]
    async fn test_outcome_notifications_get_a_lifetime() {
        let server = Arc::new(FakeServer::with(vec![employee(1, "Alice")]));
        let event_bus = Arc::new(EventBus::new());
        let notifications = NotificationCenter::new(Arc::clone(&event_bus));
        let store = EmployeeStore::new(
            server,
            Arc::new(SessionToken::new(Some(TOKEN.to_string()))),
            notifications.clone(),
            event_bus,
        )
        .with_notification_lifetime(Duration::from_millis(20));

        store.load().await.unwrap();
        store.delete(1, "Alice").await.unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications.active_lifetimes(), 1);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(notifications.is_empty());
    }
}
