//! Data models for the event service

pub mod event;

// Re-export commonly used types
pub use event::Event;
