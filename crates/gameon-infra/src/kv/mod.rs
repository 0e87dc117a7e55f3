mod file_kv;

pub use file_kv::FileKeyValueStore;
