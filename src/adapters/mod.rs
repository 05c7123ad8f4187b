// Adapters layer: concrete implementations for external systems (view, storage).

pub mod page;
pub mod storage;
