//! API呼び出し

pub mod upload;
