// src/application/session.rs
//
// One signed-in dashboard session.
//
// Built once after login, passed explicitly to whatever presents it, and torn
// down on logout. There is no global store.

use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::error::AppResult;
use crate::events::EventBus;
use crate::integrations::api::{HttpRemoteClient, RemoteClient, TokenProvider};
use crate::services::{EmployeeStore, NotificationCenter};

pub struct DashboardSession {
    pub event_bus: Arc<EventBus>,
    pub notifications: NotificationCenter,
    pub employees: Arc<EmployeeStore>,
}

impl DashboardSession {
    /// Wires a session around an existing transport.
    pub fn new(
        config: &DashboardConfig,
        remote: Arc<dyn RemoteClient>,
        tokens: Arc<dyn TokenProvider>,
    ) -> Self {
        let event_bus = Arc::new(EventBus::new());
        let notifications = NotificationCenter::new(Arc::clone(&event_bus));

        let employees = EmployeeStore::new(
            remote,
            tokens,
            notifications.clone(),
            Arc::clone(&event_bus),
        )
        .with_date_normalization(config.date_normalization);

        let employees = if config.notification_lifetime.is_zero() {
            employees
        } else {
            employees.with_notification_lifetime(config.notification_lifetime)
        };

        log::info!(
            "dashboard session started against {} (dates: {})",
            config.api_base_url,
            config.date_normalization
        );

        Self {
            event_bus,
            notifications,
            employees: Arc::new(employees),
        }
    }

    /// Wires a session talking HTTP to `config.api_base_url`.
    pub fn connect(config: &DashboardConfig, tokens: Arc<dyn TokenProvider>) -> AppResult<Self> {
        let remote = HttpRemoteClient::new(config)?;
        Ok(Self::new(config, Arc::new(remote), tokens))
    }

    /// Logout: drops cached employees, pending notifications, subscribers and
    /// the event log.
    pub fn teardown(self) {
        self.event_bus.clear_subscribers();
        self.employees.clear();
        self.notifications.clear();
        self.event_bus.clear_event_log();
        log::info!("dashboard session closed");
    }
}
