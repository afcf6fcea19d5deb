mod store;

pub use store::{remove_cache_dir, Cache};
