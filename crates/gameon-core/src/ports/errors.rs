use thiserror::Error;

/// Failures reported by the auth provider.
///
/// `Display` is the message shown to the user in the failure alert.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("An account already exists for this email address.")]
    EmailAlreadyInUse,

    #[error("Password should be at least {min_len} characters.")]
    WeakPassword { min_len: usize },

    #[error("The email address is badly formatted.")]
    InvalidEmail,

    #[error("Network error, please try again.")]
    Network(String),

    #[error("Authentication backend failed: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreReadError {
    #[error("document store unavailable: {0}")]
    Unavailable(String),

    #[error("malformed document {collection}/{id}: {reason}")]
    Malformed {
        collection: String,
        id: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreWriteError {
    #[error("document store unavailable: {0}")]
    Unavailable(String),

    #[error("write rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("location unavailable: {0}")]
    Unavailable(String),
}

/// Local key-value persistence failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("local settings I/O failed: {0}")]
    Io(String),

    #[error("local settings file is corrupt: {0}")]
    Corrupt(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppDirsError {
    #[error("system data-local directory is unavailable")]
    DataLocalDirUnavailable,
}
