//! Sign in, registration and sign out.

mod sign_in;
mod sign_out;
mod sign_up;

pub use sign_in::SignIn;
pub use sign_out::SignOut;
pub use sign_up::{RegistrationError, SignUp};
