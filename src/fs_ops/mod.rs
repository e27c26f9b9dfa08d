//! Filesystem primitives used by the slicer.

mod helpers;
mod transfer;

pub use helpers::{io_error_with_help, is_cross_device};
pub use transfer::{move_file, MoveMethod};
