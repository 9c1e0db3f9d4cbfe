//! UIコンポーネント

pub mod analyze_button;
pub mod header;
pub mod loading;
pub mod preview;
pub mod result_panel;
pub mod upload_area;
