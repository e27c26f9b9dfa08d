//! Platform-specific helpers.
//! Hides Unix/Windows differences behind a uniform API.

#[cfg(unix)]
mod unix;
#[cfg(not(unix))]
mod windows;

#[cfg(unix)]
pub use unix::{copy_symlink, open_log_file_secure_append};

#[cfg(not(unix))]
pub use windows::{copy_symlink, open_log_file_secure_append};
