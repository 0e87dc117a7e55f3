mod local_provider;
mod password;

pub use local_provider::LocalAuthProvider;
