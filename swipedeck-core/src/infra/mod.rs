//! Infrastructure module containing the API client, configuration,
//! credential storage and the scheduling primitives used by the session
//! event loop.

pub mod api_client;
pub mod config;
pub mod constants;
pub mod credentials;
pub mod scheduler;
pub mod services;

// Re-export commonly used items
pub use api_client::VercelClient;
pub use config::DeckConfig;
pub use credentials::{
    Credential, CredentialStore, FileCredentialStore, MemoryCredentialStore,
};
pub use scheduler::{Scheduler, TaskHandle};
