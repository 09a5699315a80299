use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION},
    Method, StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, error};

use shared_config::AppConfig;
use shared_models::{Account, Appointment, AppointmentStatus, Availability};

use crate::error::{DatabaseError, DatabaseResult};
use crate::store::{AccountStore, AppointmentStore};

const USERS_TABLE: &str = "/rest/v1/users";
const APPOINTMENTS_TABLE: &str = "/rest/v1/appointments";

pub struct SupabaseClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            anon_key: config.supabase_anon_key.clone(),
        }
    }

    fn get_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        headers.insert("apikey", HeaderValue::from_str(&self.anon_key)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.anon_key))?,
        );

        Ok(headers)
    }

    pub async fn request<T>(&self, method: Method, path: &str, body: Option<Value>) -> Result<T>
    where T: DeserializeOwned {
        self.request_with_headers(method, path, body, None).await
    }

    pub async fn request_with_headers<T>(&self, method: Method, path: &str,
                                         body: Option<Value>,
                                         extra_headers: Option<HeaderMap>)
                                         -> Result<T>
    where T: DeserializeOwned {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making {} request to {}", method, url);

        let mut headers = self.get_headers()?;
        if let Some(extra) = extra_headers {
            headers.extend(extra);
        }

        let mut req = self.client.request(method, &url)
            .headers(headers);

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("API error ({}): {}", status, error_text);

            return Err(match status {
                StatusCode::CONFLICT => anyhow::Error::new(DatabaseError::UniqueViolation(error_text)),
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    anyhow!("Authentication error: {}", error_text)
                }
                StatusCode::NOT_FOUND => anyhow!("Resource not found: {}", error_text),
                _ => anyhow!("API error ({}): {}", status, error_text),
            });
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }

    /// Headers asking PostgREST to echo the written rows back.
    fn return_representation() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));
        headers
    }
}

/// Account and appointment collections kept in Supabase tables, addressed
/// through the PostgREST API.
pub struct SupabaseStore {
    client: SupabaseClient,
}

impl SupabaseStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: SupabaseClient::new(config),
        }
    }

    async fn select_one<T: DeserializeOwned>(&self, path: &str) -> DatabaseResult<Option<T>> {
        let rows: Vec<T> = self.client.request(Method::GET, path, None).await?;
        Ok(rows.into_iter().next())
    }

    async fn write_returning<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> DatabaseResult<Option<T>> {
        let rows: Vec<T> = self
            .client
            .request_with_headers(method, path, body, Some(SupabaseClient::return_representation()))
            .await?;
        Ok(rows.into_iter().next())
    }
}

fn eq_filter(column: &str, value: &str) -> String {
    format!("{}=eq.{}", column, urlencoding::encode(value))
}

#[async_trait]
impl AccountStore for SupabaseStore {
    async fn insert_account(&self, account: Account) -> DatabaseResult<Account> {
        let body = serde_json::to_value(&account)?;
        let created: Option<Account> = self.write_returning(Method::POST, USERS_TABLE, Some(body)).await?;

        created.ok_or_else(|| DatabaseError::Request("Failed to create account".to_string()))
    }

    async fn find_account(&self, id: &str) -> DatabaseResult<Option<Account>> {
        let path = format!("{}?{}", USERS_TABLE, eq_filter("id", id));
        self.select_one(&path).await
    }

    async fn find_account_by_email(&self, email: &str) -> DatabaseResult<Option<Account>> {
        let path = format!("{}?{}", USERS_TABLE, eq_filter("email", &email.to_lowercase()));
        self.select_one(&path).await
    }

    async fn list_accounts(&self) -> DatabaseResult<Vec<Account>> {
        let path = format!("{}?order=createdAt.asc", USERS_TABLE);
        Ok(self.client.request(Method::GET, &path, None).await?)
    }

    async fn update_availability(
        &self,
        id: &str,
        availability: Availability,
    ) -> DatabaseResult<Option<Account>> {
        let path = format!("{}?{}", USERS_TABLE, eq_filter("id", id));
        let body = json!({ "availability": availability });
        self.write_returning(Method::PATCH, &path, Some(body)).await
    }
}

#[async_trait]
impl AppointmentStore for SupabaseStore {
    async fn insert_appointment(&self, appointment: Appointment) -> DatabaseResult<Appointment> {
        let body = serde_json::to_value(&appointment)?;
        let created: Option<Appointment> = self
            .write_returning(Method::POST, APPOINTMENTS_TABLE, Some(body))
            .await?;

        created.ok_or_else(|| DatabaseError::Request("Failed to create appointment".to_string()))
    }

    async fn find_appointment(&self, id: &str) -> DatabaseResult<Option<Appointment>> {
        let path = format!("{}?{}", APPOINTMENTS_TABLE, eq_filter("id", id));
        self.select_one(&path).await
    }

    async fn list_appointments(&self) -> DatabaseResult<Vec<Appointment>> {
        let path = format!("{}?order=createdAt.asc", APPOINTMENTS_TABLE);
        Ok(self.client.request(Method::GET, &path, None).await?)
    }

    async fn delete_appointment(&self, id: &str) -> DatabaseResult<Option<Appointment>> {
        let path = format!("{}?{}", APPOINTMENTS_TABLE, eq_filter("id", id));
        self.write_returning(Method::DELETE, &path, None).await
    }

    async fn update_appointment_date(
        &self,
        id: &str,
        appointment_date: DateTime<Utc>,
    ) -> DatabaseResult<Option<Appointment>> {
        let path = format!("{}?{}", APPOINTMENTS_TABLE, eq_filter("id", id));
        let body = json!({ "appointmentDate": appointment_date });
        self.write_returning(Method::PATCH, &path, Some(body)).await
    }

    async fn update_appointment_status(
        &self,
        id: &str,
        status: AppointmentStatus,
    ) -> DatabaseResult<Option<Appointment>> {
        let path = format!("{}?{}", APPOINTMENTS_TABLE, eq_filter("id", id));
        let body = json!({ "status": status });
        self.write_returning(Method::PATCH, &path, Some(body)).await
    }
}
