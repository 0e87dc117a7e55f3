pub mod auth;
pub mod documents;
pub mod fs;
pub mod kv;
pub mod time;

pub use auth::LocalAuthProvider;
pub use documents::JsonFileDocumentStore;
pub use kv::FileKeyValueStore;
pub use time::SystemClock;
