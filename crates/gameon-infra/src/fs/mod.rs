mod json_file;

pub use json_file::{atomic_write, read_to_string_opt};
