//! Classification of MongoDB driver errors.

use feeder_store::StoreError;
use mongodb::error::{Error, ErrorKind, WriteFailure};

/// Map a driver error onto the store taxonomy.
///
/// Server-reported command and write errors keep their code and message;
/// connectivity problems become [`StoreError::Transport`].
pub fn classify(error: Error) -> StoreError {
    match error.kind.as_ref() {
        ErrorKind::Command(command) => StoreError::Status {
            code: command.code,
            message: command.message.clone(),
        },
        ErrorKind::Write(WriteFailure::WriteError(write)) => StoreError::Status {
            code: write.code,
            message: write.message.clone(),
        },
        ErrorKind::Write(WriteFailure::WriteConcernError(concern)) => StoreError::Status {
            code: concern.code,
            message: concern.message.clone(),
        },
        ErrorKind::Io(_)
        | ErrorKind::ServerSelection { .. }
        | ErrorKind::ConnectionPoolCleared { .. } => StoreError::Transport(error.to_string()),
        _ => StoreError::Other(error.to_string()),
    }
}
