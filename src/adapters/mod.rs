// Adapters layer: concrete implementations for external systems (files, output formats).

pub mod render;
pub mod source;
pub mod storage;
