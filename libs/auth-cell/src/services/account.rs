use std::sync::{Arc, OnceLock};

use regex::Regex;
use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_database::{AccountStore, AppState, DatabaseError};
use shared_models::account::{Account, AccountKind, PublicAccount, Role};
use shared_models::auth::LoginResponse;
use shared_utils::jwt::issue_token;

use crate::models::{AccountError, LoginRequest, RegisterRequest};
use crate::services::password::{PasswordService, MIN_PASSWORD_LENGTH};

const EMAIL_PATTERN: &str = r"^\w+([\.-]?\w+)*@\w+([\.-]?\w+)*(\.\w{2,3})+$";

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"))
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Absent or blank roles fall back to `patient`.
pub fn normalize_role(role: Option<&str>) -> Result<Role, AccountError> {
    match role.map(str::trim).filter(|r| !r.is_empty()) {
        None => Ok(Role::Patient),
        Some(value) => value.parse().map_err(AccountError::Validation),
    }
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

pub struct AccountService {
    accounts: Arc<dyn AccountStore>,
    config: Arc<AppConfig>,
}

impl AccountService {
    pub fn new(state: &AppState) -> Self {
        Self {
            accounts: Arc::clone(&state.accounts),
            config: Arc::clone(&state.config),
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<Account, AccountError> {
        let name = request
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AccountError::Validation("Please add a name".to_string()))?
            .to_string();

        let email = request
            .email
            .as_deref()
            .map(normalize_email)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AccountError::Validation("Please add an email".to_string()))?;

        if !is_valid_email(&email) {
            warn!("Rejected registration with malformed email");
            return Err(AccountError::Validation("Please add a valid email".to_string()));
        }

        let password = request
            .password
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AccountError::Validation("Please add a password".to_string()))?;

        if !PasswordService::meets_minimum_length(password) {
            return Err(AccountError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let kind = match normalize_role(request.role.as_deref())? {
            Role::Patient => AccountKind::Patient,
            Role::Doctor => {
                let specialization = request
                    .specialization
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .ok_or_else(|| {
                        AccountError::Validation("Please add a specialization for doctor accounts".to_string())
                    })?;
                AccountKind::doctor(specialization)
            }
        };

        if self.accounts.find_account_by_email(&email).await?.is_some() {
            warn!("Registration attempted with an email that is already taken");
            return Err(AccountError::EmailTaken);
        }

        let password_hash = PasswordService::hash_password(password)
            .map_err(|e| AccountError::Hashing(e.to_string()))?;

        let account = Account::new(name, email, password_hash, kind);
        let account = self.accounts.insert_account(account).await.map_err(|e| match e {
            DatabaseError::UniqueViolation(_) => AccountError::EmailTaken,
            other => AccountError::Store(other),
        })?;

        info!("Registered {} account {}", account.role(), account.id);
        Ok(account)
    }

    /// Same error for an unknown email and a wrong password.
    pub async fn authenticate(&self, request: LoginRequest) -> Result<LoginResponse, AccountError> {
        let (Some(email), Some(password)) = (request.email.as_deref(), request.password.as_deref()) else {
            return Err(AccountError::Validation("Please provide an email and password".to_string()));
        };

        let email = normalize_email(email);
        debug!("Authenticating account by email");

        let Some(account) = self.accounts.find_account_by_email(&email).await? else {
            warn!("Login failed: unknown email");
            return Err(AccountError::InvalidCredentials);
        };

        let verified = PasswordService::verify_password(password, &account.password_hash)
            .map_err(|e| AccountError::Hashing(e.to_string()))?;

        if !verified {
            warn!("Login failed for account {}: wrong password", account.id);
            return Err(AccountError::InvalidCredentials);
        }

        let role = account.role();
        let token = issue_token(&account.id, role, &self.config.jwt_secret, self.config.token_ttl_hours)
            .map_err(AccountError::Token)?;

        info!("Account {} logged in", account.id);
        Ok(LoginResponse {
            token,
            role,
            user_id: account.id,
            name: account.name,
        })
    }

    pub async fn list_users(&self, role: Option<Role>) -> Result<Vec<PublicAccount>, AccountError> {
        let accounts = self.accounts.list_accounts().await?;

        Ok(accounts
            .iter()
            .filter(|account| role.map_or(true, |r| account.role() == r))
            .map(Account::to_public)
            .collect())
    }
}
