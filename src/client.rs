//! Roster service HTTP client implementation.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::error::{AppError, Result};
use crate::models::Employee;

/// Outcome of a roster fetch: the collection, or the service's
/// authorization-failure signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Roster(Vec<Employee>),
    Unauthorized,
}

/// Boundary to the remote roster service.
///
/// The gateway does not judge token validity itself; it reports whatever the
/// service signals. Transport and decoding failures are errors, distinct from
/// the `Unauthorized` outcome.
#[async_trait]
pub trait RosterGateway {
    /// Fetch the whole roster under the given bearer token.
    async fn fetch_all(&self, token: &str) -> Result<FetchOutcome>;

    /// Delete one employee by id. `true` means the service confirmed it.
    async fn delete(&self, token: &str, id: i64) -> Result<bool>;
}

/// HTTP adapter for the roster service.
pub struct HttpRosterGateway {
    client: Client,
    base_url: String,
}

impl HttpRosterGateway {
    /// Create a new gateway.
    ///
    /// # Arguments
    /// * `base_url` - The service URL (e.g., "https://hr.example.com/api")
    /// * `timeout_secs` - Request timeout in seconds
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn employees_url(&self) -> String {
        format!("{base}/employees", base = self.base_url)
    }
}

#[async_trait]
impl RosterGateway for HttpRosterGateway {
    async fn fetch_all(&self, token: &str) -> Result<FetchOutcome> {
        let response = self
            .client
            .get(self.employees_url())
            .bearer_auth(token)
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                debug!("Roster fetch rejected: {}", response.status());
                Ok(FetchOutcome::Unauthorized)
            }
            status if status.is_success() => {
                let roster: Vec<Employee> = response.json().await?;
                Ok(FetchOutcome::Roster(roster))
            }
            status => Err(AppError::service(format!("Unexpected roster response: {status}"))),
        }
    }

    async fn delete(&self, token: &str, id: i64) -> Result<bool> {
        let url = format!("{}/{}", self.employees_url(), id);
        let response = self.client.delete(&url).bearer_auth(token).send().await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AppError::Unauthorized),
            status => {
                if !status.is_success() {
                    debug!("Delete of employee {id} refused: {status}");
                }
                Ok(status.is_success())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let gateway = HttpRosterGateway::new("https://hr.example.com/api/", 30).unwrap();
        assert_eq!(gateway.employees_url(), "https://hr.example.com/api/employees");
    }

    #[test]
    fn test_employees_url() {
        let gateway = HttpRosterGateway::new("http://localhost:8080", 30).unwrap();
        assert_eq!(gateway.employees_url(), "http://localhost:8080/employees");
    }
}
