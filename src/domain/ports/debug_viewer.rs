//! Debug viewer port
//!
//! Opens a local viewer (usually a browser) on the forwarded debug URL.
//! Best effort: callers log failures and carry on.

pub trait DebugViewer {
    fn open(&self, url: &str) -> Result<(), String>;
}
