use crate::file::FileError;

// Exit codes for CLI automation
pub const SUCCESS: i32 = 0;
pub const ERROR: i32 = 1;
pub const NOT_FOUND: i32 = 2;
pub const INVALID_INPUT: i32 = 3;

/// Map a command failure to an exit code
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<FileError>() {
        Some(FileError::NotFound(_)) => NOT_FOUND,
        Some(FileError::IsDirectory(_)) | Some(FileError::UnknownEncoding(_)) => INVALID_INPUT,
        _ => ERROR,
    }
}
