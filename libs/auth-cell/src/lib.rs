pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::AccountError;
pub use services::{AccountService, PasswordService};
