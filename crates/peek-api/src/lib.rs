// peek-api: Async Rust client for the Peek digital-signage backend

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod screens;
pub mod session;
pub mod transport;

pub use client::ApiClient;
pub use error::Error;
pub use models::{ImageUpload, NewUser, Registration, ScreenRecord, ScreenStats, Tenant, User};
pub use session::{
    MemorySessionStore, SessionStore, SessionStoreError, UnauthorizedHook, noop_hook,
};
pub use transport::{TlsMode, TransportConfig};
