//! Repository port for tracking-session persistence.
//!
//! This module defines the trait boundary between the domain and
//! infrastructure layers for storing and retrieving recorded tracking
//! sessions.

use std::path::Path;

use crate::{Result, pipeline::tracking::TrackingSession};

/// Port for persisting and loading tracking sessions.
///
/// This trait abstracts the storage mechanism, allowing different
/// implementations (MessagePack files, in-memory stores for tests) without
/// coupling the pipeline to a serialization format.
///
/// # Examples
///
/// ```no_run
/// use gridchase::ports::SessionRepository;
/// use gridchase::pipeline::TrackingSession;
/// use std::path::Path;
///
/// fn archive<R: SessionRepository>(
///     repo: &R,
///     session: &TrackingSession,
///     path: &Path,
/// ) -> gridchase::Result<()> {
///     repo.save(session, path)
/// }
/// ```
pub trait SessionRepository {
    /// Save a session to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be written or serialization
    /// fails.
    fn save(&self, session: &TrackingSession, path: &Path) -> Result<()>;

    /// Load a session from persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents do not
    /// deserialize into a session.
    fn load(&self, path: &Path) -> Result<TrackingSession>;
}
