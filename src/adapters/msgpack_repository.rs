//! MessagePack implementation of the session repository.
//!
//! This adapter implements the SessionRepository port using rmp_serde for
//! compact binary serialization.

use std::{fs::File, path::Path};

use crate::{
    Result, error::Error, pipeline::tracking::TrackingSession, ports::SessionRepository,
};

/// MessagePack-based session repository.
///
/// Stores recorded tracking sessions in the MessagePack binary format via
/// rmp_serde, which keeps long traces compact on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    /// Create a new MessagePack repository.
    pub fn new() -> Self {
        Self
    }
}

impl SessionRepository for MsgPackRepository {
    fn save(&self, session: &TrackingSession, path: &Path) -> Result<()> {
        let mut file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;

        rmp_serde::encode::write(&mut file, session).map_err(|e| Error::SerializationContext {
            operation: "serialize session to MessagePack".to_string(),
            message: e.to_string(),
        })?;

        Ok(())
    }

    fn load(&self, path: &Path) -> Result<TrackingSession> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        let session =
            rmp_serde::decode::from_read(&file).map_err(|e| Error::SerializationContext {
                operation: "deserialize session from MessagePack".to_string(),
                message: e.to_string(),
            })?;

        Ok(session)
    }
}
