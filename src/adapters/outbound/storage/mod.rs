// Infrastructure error conversions
pub mod error;

// Storage implementations
pub mod in_memory_backend;

// Re-export key types
pub use in_memory_backend::InMemoryBackend;
