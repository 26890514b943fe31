mod cache;

pub use cache::MemCache;
