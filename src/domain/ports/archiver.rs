//! Archiver port - turns an install root into a single archive file

use std::path::Path;

use crate::error::WrtResult;

pub trait Archiver {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Archive the contents of `install_root` (paths relative to it) into
    /// `output`, replacing any existing file.
    fn archive(&self, install_root: &Path, output: &Path) -> WrtResult<()>;
}
