// Adapters layer: concrete implementations for external systems (document store, snapshot files, http).

pub mod http;
pub mod memory;
pub mod storage;
