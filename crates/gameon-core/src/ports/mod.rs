//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. This follows Hexagonal Architecture
//! principles: the session gate, preference store and theme resolver only
//! ever talk to these traits, so every backend can be swapped for a fake in
//! tests.

pub mod app_dirs;
pub mod appearance;
pub mod auth;
mod clock;
pub mod document_store;
pub mod errors;
pub mod geolocation;
pub mod kv;
pub mod navigation;
mod notice;

pub use app_dirs::AppDirsPort;
pub use appearance::AppearancePort;
pub use auth::{AuthEventSender, AuthPort, AuthSubscription};
pub use clock::*;
pub use document_store::{merge_documents, Document, DocumentStorePort};
pub use errors::{
    AppDirsError, AuthError, LocationError, PersistenceError, StoreReadError, StoreWriteError,
};
pub use geolocation::{GeolocationPort, PermissionStatus};
pub use kv::KeyValuePort;
pub use navigation::NavigationPort;
pub use notice::UserNoticePort;
