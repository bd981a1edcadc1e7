// src/integrations/api/client.rs
//
// Employees API Integration
//
// ARCHITECTURE:
// - REST client for the employees service
// - Bearer token supplied per call, never stored here
// - Maps HTTP outcomes → TransportFailure (never touches local state)
// - Used by EmployeeStore
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Server error bodies are logged, never shown to the operator

use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::DashboardConfig;
use crate::domain::{Employee, EmployeeId, EmployeePayload};
use crate::error::{AppResult, TransportFailure};

/// Longest server error body kept in a `TransportFailure::Status`
const MAX_ERROR_BODY: usize = 512;

/// Calls the dashboard issues against the employees service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteClient: Send + Sync {
    /// `GET /employees`
    async fn list_employees(&self, token: &str) -> Result<Vec<Employee>, TransportFailure>;

    /// `PUT /employees/{id}`, answering with the stored record
    async fn update_employee(
        &self,
        token: &str,
        employee_id: EmployeeId,
        payload: &EmployeePayload,
    ) -> Result<Employee, TransportFailure>;

    /// `DELETE /employees/{id}`
    async fn delete_employee(
        &self,
        token: &str,
        employee_id: EmployeeId,
    ) -> Result<(), TransportFailure>;
}

/// reqwest-backed `RemoteClient`
pub struct HttpRemoteClient {
    base_url: String,
    http_client: Client,
}

impl HttpRemoteClient {
    /// Builds a client with the configured base URL and timeout.
    pub fn new(config: &DashboardConfig) -> AppResult<Self> {
        config.validate()?;

        let http_client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self::with_client(&config.api_base_url, http_client))
    }

    /// Uses an already configured reqwest client.
    pub fn with_client(base_url: &str, http_client: Client) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            http_client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn employees_url(&self) -> String {
        format!("{}/employees", self.base_url)
    }

    fn employee_url(&self, employee_id: EmployeeId) -> String {
        format!("{}/employees/{}", self.base_url, employee_id)
    }

    fn authorized(request: RequestBuilder, token: &str) -> RequestBuilder {
        request
            .header(header::ACCEPT, "application/json")
            .bearer_auth(token)
    }

    // ========================================================================
    // INTERNAL: Request Execution
    // ========================================================================

    /// Sends the request and rejects non-2xx answers.
    async fn send(request: RequestBuilder, what: &str) -> Result<Response, TransportFailure> {
        let response = request.send().await.map_err(|e| {
            log::warn!("{} failed before reaching the server: {}", what, e);
            TransportFailure::from(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let mut body = response.text().await.unwrap_or_default();
        if body.len() > MAX_ERROR_BODY {
            let mut cut = MAX_ERROR_BODY;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            body.truncate(cut);
        }

        log::warn!("{} rejected with status {}: {}", what, status, body);
        Err(TransportFailure::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn decode<T>(response: Response, what: &str) -> Result<T, TransportFailure>
    where
        T: DeserializeOwned,
    {
        response.json::<T>().await.map_err(|e| {
            log::warn!("{} answered with an unexpected body: {}", what, e);
            TransportFailure::Decode(e.to_string())
        })
    }
}

#[async_trait]
impl RemoteClient for HttpRemoteClient {
    async fn list_employees(&self, token: &str) -> Result<Vec<Employee>, TransportFailure> {
        let request = Self::authorized(self.http_client.get(self.employees_url()), token);
        let response = Self::send(request, "GET /employees").await?;
        let employees: Vec<Employee> = Self::decode(response, "GET /employees").await?;

        log::info!("fetched {} employees", employees.len());
        Ok(employees)
    }

    async fn update_employee(
        &self,
        token: &str,
        employee_id: EmployeeId,
        payload: &EmployeePayload,
    ) -> Result<Employee, TransportFailure> {
        let what = format!("PUT /employees/{}", employee_id);
        let request = Self::authorized(self.http_client.put(self.employee_url(employee_id)), token)
            .json(payload);
        let response = Self::send(request, &what).await?;
        let employee: Employee = Self::decode(response, &what).await?;

        log::info!("updated employee {}", employee_id);
        Ok(employee)
    }

    async fn delete_employee(
        &self,
        token: &str,
        employee_id: EmployeeId,
    ) -> Result<(), TransportFailure> {
        let what = format!("DELETE /employees/{}", employee_id);
        let request =
            Self::authorized(self.http_client.delete(self.employee_url(employee_id)), token);
        Self::send(request, &what).await?;

        log::info!("deleted employee {}", employee_id);
        Ok(())
    }
}
