// src/services/employee_store.rs
//
// Employee Store - single source of truth for the employee collection
//
// CRITICAL RULES:
// - Local state changes only after the server confirmed the change
// - Nothing reaches the server without passing the employee schema
// - The collection lock is never held across an await
// - Every failure ends in a notification; none of them is fatal
//
// KNOWN LIMITATION:
// - Concurrent calls resolve in any order. A `load` that lands while an
//   update or delete is in flight may overwrite that call's result.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::domain::{
    employee_schema, DateNormalization, Employee, EmployeeCollection, EmployeeId,
    EmployeePayload, PartialNotification, UpdateEmployeeValues,
};
use crate::error::{StoreError, StoreResult, TransportFailure};
use crate::events::{
    EmployeeCollectionChanged, EmployeeDeleted, EmployeeUpdated, EmployeesLoaded, EventBus,
};
use crate::integrations::api::{RemoteClient, TokenProvider};
use crate::services::notification_center::NotificationCenter;
use crate::validation::{validate, FieldRules, ValidationError};

/// Operator-facing texts for every outcome.
pub mod messages {
    pub const LOAD_FAILED_TITLE: &str = "Houve um problema";
    pub const LOAD_FAILED_DESCRIPTION: &str = "Ocorreu um erro ao buscar os funcionários";

    pub const UPDATE_SUCCEEDED_TITLE: &str = "Dados alterados com sucesso!";
    pub const UPDATE_INVALID_TITLE: &str = "Campos faltando ou inválidos!";
    pub const UPDATE_INVALID_DESCRIPTION: &str = "Verifique se não deixou passar nenhum campo.";
    pub const UPDATE_FAILED_TITLE: &str = "Houve um problema ao tentar atualizar os dados!";

    pub const DELETE_SUCCEEDED_TITLE: &str = "Funcionário deletado!";
    pub const DELETE_FAILED_TITLE: &str = "Houve um problema!";

    pub fn delete_succeeded_description(name: &str) -> String {
        format!("O {} foi deletado com sucesso", name)
    }

    pub fn delete_failed_description(name: &str) -> String {
        format!("Ocorreu um erro ao tentar deletar o {}.", name)
    }
}

pub struct EmployeeStore {
    collection: Arc<RwLock<EmployeeCollection>>,
    remote: Arc<dyn RemoteClient>,
    tokens: Arc<dyn TokenProvider>,
    notifications: NotificationCenter,
    event_bus: Arc<EventBus>,
    schema: FieldRules,
    date_normalization: DateNormalization,
    notification_lifetime: Option<Duration>,
}

impl EmployeeStore {
    pub fn new(
        remote: Arc<dyn RemoteClient>,
        tokens: Arc<dyn TokenProvider>,
        notifications: NotificationCenter,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            collection: Arc::new(RwLock::new(EmployeeCollection::new())),
            remote,
            tokens,
            notifications,
            event_bus,
            schema: employee_schema(),
            date_normalization: DateNormalization::default(),
            notification_lifetime: None,
        }
    }

    pub fn with_date_normalization(mut self, date_normalization: DateNormalization) -> Self {
        self.date_normalization = date_normalization;
        self
    }

    /// Outcome notifications dismiss themselves after `lifetime`.
    pub fn with_notification_lifetime(mut self, lifetime: Duration) -> Self {
        self.notification_lifetime = Some(lifetime);
        self
    }

    // ========================================================================
    // READS
    // ========================================================================

    pub fn employees(&self) -> Vec<Employee> {
        self.collection.read().unwrap().to_vec()
    }

    pub fn find(&self, employee_id: EmployeeId) -> Option<Employee> {
        self.collection.read().unwrap().get(employee_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.collection.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.read().unwrap().is_empty()
    }

    // ========================================================================
    // REMOTE OPERATIONS
    // ========================================================================

    /// Replaces the collection with the server's list.
    ///
    /// On failure the current collection stays as it is.
    pub async fn load(&self) -> StoreResult<()> {
        let result = match self.current_token() {
            Ok(token) => self.remote.list_employees(&token).await,
            Err(failure) => Err(failure),
        };

        match result {
            Ok(employees) => {
                let snapshot = self.mutate(|collection| collection.replace_all(employees));
                self.event_bus.emit(EmployeesLoaded::new(snapshot.len()));
                self.event_bus.emit(EmployeeCollectionChanged::new(snapshot));
                Ok(())
            }
            Err(failure) => {
                log::error!("loading employees failed: {}", failure);
                self.notify(
                    PartialNotification::error(messages::LOAD_FAILED_TITLE)
                        .with_description(messages::LOAD_FAILED_DESCRIPTION),
                );
                Err(failure.into())
            }
        }
    }

    /// Normalizes, validates and sends an edit, then swaps in the server's
    /// answer.
    ///
    /// A validation failure returns the field errors for the form and never
    /// reaches the server.
    pub async fn update(
        &self,
        employee_id: EmployeeId,
        values: UpdateEmployeeValues,
    ) -> StoreResult<()> {
        let payload = match self.prepare_payload(values) {
            Ok(payload) => payload,
            Err(errors) => {
                log::info!(
                    "update of employee {} rejected by validation: {}",
                    employee_id,
                    errors
                );
                self.notify(
                    PartialNotification::error(messages::UPDATE_INVALID_TITLE)
                        .with_description(messages::UPDATE_INVALID_DESCRIPTION),
                );
                return Err(StoreError::Validation(errors));
            }
        };

        let result = match self.current_token() {
            Ok(token) => {
                self.remote
                    .update_employee(&token, employee_id, &payload)
                    .await
            }
            Err(failure) => Err(failure),
        };

        let mut updated = match result {
            Ok(updated) => updated,
            Err(failure) => {
                log::error!("updating employee {} failed: {}", employee_id, failure);
                self.notify(PartialNotification::error(messages::UPDATE_FAILED_TITLE));
                return Err(failure.into());
            }
        };

        self.notify(PartialNotification::success(messages::UPDATE_SUCCEEDED_TITLE));

        if updated.id != employee_id {
            log::warn!(
                "server answered update of {} with id {}; keeping {}",
                employee_id,
                updated.id,
                employee_id
            );
            updated.id = employee_id;
        }

        let (applied, snapshot) = {
            let mut collection = self.collection.write().unwrap();
            let applied = collection.replace(employee_id, updated);
            (applied, collection.to_vec())
        };

        if !applied {
            log::warn!(
                "employee {} updated remotely but missing locally; nothing replaced",
                employee_id
            );
        }

        self.event_bus.emit(EmployeeUpdated::new(employee_id, applied));
        if applied {
            self.event_bus.emit(EmployeeCollectionChanged::new(snapshot));
        }
        Ok(())
    }

    /// Deletes remotely, then drops the employee from the collection.
    pub async fn delete(&self, employee_id: EmployeeId, employee_name: &str) -> StoreResult<()> {
        let result = match self.current_token() {
            Ok(token) => self.remote.delete_employee(&token, employee_id).await,
            Err(failure) => Err(failure),
        };

        if let Err(failure) = result {
            log::error!("deleting employee {} failed: {}", employee_id, failure);
            self.notify(
                PartialNotification::error(messages::DELETE_FAILED_TITLE)
                    .with_description(messages::delete_failed_description(employee_name)),
            );
            return Err(failure.into());
        }

        self.notify(
            PartialNotification::success(messages::DELETE_SUCCEEDED_TITLE)
                .with_description(messages::delete_succeeded_description(employee_name)),
        );

        let snapshot = self.mutate(|collection| {
            collection.remove(employee_id);
        });

        self.event_bus
            .emit(EmployeeDeleted::new(employee_id, employee_name.to_string()));
        self.event_bus.emit(EmployeeCollectionChanged::new(snapshot));
        Ok(())
    }

    // ========================================================================
    // LOCAL CACHE PRIMITIVES
    // ========================================================================

    /// Appends an employee the server already created. No remote call.
    pub fn add_local(&self, employee: Employee) {
        log::debug!("caching created employee {}", employee.id);
        let snapshot = self.mutate(|collection| collection.upsert(employee));
        self.event_bus.emit(EmployeeCollectionChanged::new(snapshot));
    }

    /// Replaces the collection with a snapshot obtained elsewhere.
    pub fn replace_all(&self, employees: Vec<Employee>) {
        let snapshot = self.mutate(|collection| collection.replace_all(employees));
        self.event_bus.emit(EmployeeCollectionChanged::new(snapshot));
    }

    /// Empties the collection (session teardown).
    pub fn clear(&self) {
        let snapshot = self.mutate(EmployeeCollection::clear);
        self.event_bus.emit(EmployeeCollectionChanged::new(snapshot));
    }

    // ========================================================================
    // INTERNAL
    // ========================================================================

    fn prepare_payload(&self, values: UpdateEmployeeValues) -> Result<EmployeePayload, ValidationError> {
        let record = values.into_record(self.date_normalization);
        let valid = validate(&self.schema, record)?;

        EmployeePayload::from_record(valid).map_err(|e| {
            log::error!("validated employee record did not deserialize: {}", e);
            [("payload", e.to_string())].into_iter().collect()
        })
    }

    fn current_token(&self) -> Result<String, TransportFailure> {
        self.tokens
            .token()
            .ok_or(TransportFailure::MissingCredential)
    }

    /// Applies `change` under the write lock and returns the resulting snapshot.
    fn mutate<F>(&self, change: F) -> Vec<Employee>
    where
        F: FnOnce(&mut EmployeeCollection),
    {
        let mut collection = self.collection.write().unwrap();
        change(&mut collection);
        collection.to_vec()
    }

    fn notify(&self, notification: PartialNotification) {
        match self.notification_lifetime {
            Some(lifetime) => {
                self.notifications.notify_with_lifetime(notification, lifetime);
            }
            None => {
                self.notifications.notify(notification);
            }
        }
    }
}
