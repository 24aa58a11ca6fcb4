// Adapters layer: concrete implementations of the domain ports (local files, HTTP).

pub mod http;
pub mod storage;
