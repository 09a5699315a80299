use std::sync::Arc;
use chrono::{Duration, TimeZone, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use base64::{Engine as _, engine::general_purpose};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::{AppConfig, StoreBackend, DEFAULT_PORT, DEFAULT_TOKEN_TTL_HOURS};
use shared_database::AppState;
use shared_models::account::{Account, AccountKind, DayOfWeek, Role};
use shared_models::auth::AuthUser;

pub struct TestConfig {
    pub jwt_secret: String,
    pub supabase_url: String,
    pub supabase_anon_key: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: "test-anon-key".to_string(),
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            store_backend: StoreBackend::Memory,
            supabase_url: self.supabase_url.clone(),
            supabase_anon_key: self.supabase_anon_key.clone(),
            jwt_secret: self.jwt_secret.clone(),
            token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
            port: DEFAULT_PORT,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }

    /// Router state over a fresh in-memory store.
    pub fn to_state(&self) -> AppState {
        AppState::in_memory(self.to_app_config())
    }
}

pub struct TestUser {
    pub id: String,
    pub role: Role,
}

impl TestUser {
    pub fn new(id: &str, role: Role) -> Self {
        Self {
            id: id.to_string(),
            role,
        }
    }

    pub fn doctor() -> Self {
        Self::new(&Uuid::new_v4().to_string(), Role::Doctor)
    }

    pub fn patient() -> Self {
        Self::new(&Uuid::new_v4().to_string(), Role::Patient)
    }

    pub fn to_auth_user(&self) -> AuthUser {
        AuthUser {
            id: self.id.clone(),
            role: self.role,
        }
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(user: &TestUser, secret: &str, exp_hours: Option<i64>) -> String {
        let now = Utc::now();
        let exp = now + Duration::hours(exp_hours.unwrap_or(24));

        let header = json!({
            "alg": "HS256",
            "typ": "JWT"
        });

        let payload = json!({
            "sub": user.id,
            "role": user.role,
            "iat": now.timestamp(),
            "exp": exp.timestamp()
        });

        let header_encoded = general_purpose::URL_SAFE_NO_PAD.encode(header.to_string());
        let payload_encoded = general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string());

        let signing_input = format!("{}.{}", header_encoded, payload_encoded);

        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();
        let signature_encoded = general_purpose::URL_SAFE_NO_PAD.encode(signature);

        format!("{}.{}", signing_input, signature_encoded)
    }

    pub fn create_expired_token(user: &TestUser, secret: &str) -> String {
        Self::create_test_token(user, secret, Some(-1))
    }

    pub fn create_invalid_signature_token(user: &TestUser) -> String {
        Self::create_test_token(user, "wrong-secret", Some(24))
    }

    pub fn create_malformed_token() -> String {
        "invalid.token".to_string()
    }

    pub fn bearer(user: &TestUser, config: &AppConfig) -> String {
        format!("Bearer {}", Self::create_test_token(user, &config.jwt_secret, Some(24)))
    }
}

/// Ready-made account documents with fixed ids, for seeding a store directly.
pub struct AccountFixtures;

impl AccountFixtures {
    pub fn doctor(id: &str, name: &str, specialization: &str) -> Account {
        Account {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{}@clinic.test", id),
            password_hash: "not-a-real-hash".to_string(),
            kind: AccountKind::doctor(specialization),
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    pub fn patient(id: &str, name: &str) -> Account {
        Account {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{}@clinic.test", id),
            password_hash: "not-a-real-hash".to_string(),
            kind: AccountKind::Patient,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    /// A `weeklyHours` request body covering Mon..Sun with the same hours,
    /// weekends disabled.
    pub fn weekly_hours_json(start: &str, end: &str) -> Value {
        DayOfWeek::ALL
            .iter()
            .map(|day| json!({"day": day, "start": start, "end": end, "enabled": !day.is_weekend()}))
            .collect()
    }

    /// State seeded with doctor `d1` (Dr. Grey, Surgery) and patient `p1` (Pat Doe).
    pub async fn seeded_state(config: &TestConfig) -> AppState {
        let state = config.to_state();
        state
            .accounts
            .insert_account(Self::doctor("d1", "Dr. Grey", "Surgery"))
            .await
            .expect("seed doctor");
        state
            .accounts
            .insert_account(Self::patient("p1", "Pat Doe"))
            .await
            .expect("seed patient");
        state
    }
}
