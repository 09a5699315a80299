pub mod error;
pub mod memory;
pub mod state;
pub mod store;
pub mod supabase;

pub use error::{DatabaseError, DatabaseResult};
pub use memory::InMemoryStore;
pub use state::AppState;
pub use store::{AccountStore, AppointmentStore};
pub use supabase::{SupabaseClient, SupabaseStore};
