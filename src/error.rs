use std::io;
use std::path::PathBuf;

use crate::models::RecordId;

/// Failures surfaced by the layers around the rosters. The rosters themselves
/// never fail; a missing record comes back as `false`/`None` and is turned
/// into [`RosterError::NotFound`] by the caller that wants to report it.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("{kind} with ID {id} not found.")]
    NotFound { kind: &'static str, id: RecordId },

    #[error("could not locate home directory")]
    HomeDirUnavailable,

    #[error("failed to create log directory {}", path.display())]
    LogDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open log file {}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
