// Adapters layer: concrete implementations for external systems (file formats, storage).

pub mod lmk;
pub mod output;
pub mod storage;

pub use storage::LocalStorage;
