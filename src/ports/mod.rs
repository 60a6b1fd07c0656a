//! Trait boundaries between the core and infrastructure.

pub mod observer;
pub mod repository;

pub use observer::Observer;
pub use repository::SessionRepository;
