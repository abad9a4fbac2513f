pub mod client;
pub mod json;
pub mod models;
pub mod target;

// Re-export commonly used items
pub use client::{fetch_all, fetch_all_with_progress};
pub use target::parse_video_url;
