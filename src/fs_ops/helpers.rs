//! I/O error helpers.
//!
//! Wraps io::Error with the operation, the path involved and a short hint,
//! usable with map_err in anyhow::Result code:
//!
//!   fs::create_dir(dir).map_err(io_error_with_help("create group directory", dir))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

/// Short, actionable hint for a raw OS error code.
fn os_hint(code: i32) -> Option<&'static str> {
    #[cfg(unix)]
    {
        match code {
            libc::EACCES | libc::EPERM => Some("permission denied; check ownership and write permissions"),
            libc::EXDEV => Some("cross-filesystem; atomic rename not possible"),
            libc::ENOENT => Some("path not found; it may have been moved or deleted meanwhile"),
            libc::EEXIST => Some("already exists"),
            libc::ENOSPC => Some("no space left on device"),
            libc::EROFS => Some("read-only filesystem"),
            libc::ENAMETOOLONG => Some("file name too long for the target filesystem"),
            libc::EMFILE | libc::ENFILE => Some("too many open files; raise the descriptor limit"),
            _ => None,
        }
    }
    #[cfg(windows)]
    {
        match code {
            5 => Some("access denied; check permissions"),
            17 => Some("not same device; cross-filesystem move"),
            32 => Some("sharing violation; file is in use"),
            2 | 3 => Some("path not found"),
            80 | 183 => Some("already exists"),
            112 => Some("disk full"),
            206 => Some("file name or path too long"),
            _ => None,
        }
    }
    #[cfg(not(any(unix, windows)))]
    {
        let _ = code;
        None
    }
}

fn kind_hint(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::PermissionDenied => Some("permission denied"),
        io::ErrorKind::NotFound => Some("path not found"),
        io::ErrorKind::AlreadyExists => Some("already exists"),
        _ => None,
    }
}

pub(crate) fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);
    match e.raw_os_error() {
        Some(code) => {
            if let Some(h) = os_hint(code) {
                msg.push_str(" (");
                msg.push_str(h);
                msg.push(')');
            }
            msg.push_str(&format!(" [os code: {code}]"));
        }
        None => {
            if let Some(h) = kind_hint(e.kind()) {
                msg.push_str(" (");
                msg.push_str(h);
                msg.push(')');
            }
        }
    }
    msg
}

/// `.map_err` adapter for anyhow::Result code.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(build_message(op, path, &e))
}

/// True if the error is a cross-device rename failure (EXDEV / ERROR_NOT_SAME_DEVICE).
pub fn is_cross_device(e: &io::Error) -> bool {
    match e.raw_os_error() {
        #[cfg(unix)]
        Some(code) => code == libc::EXDEV,
        #[cfg(windows)]
        Some(code) => code == 17,
        #[cfg(not(any(unix, windows)))]
        Some(_) => false,
        None => false,
    }
}
