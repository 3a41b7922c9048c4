//! Minifier port - bundles script and style sources into one output

use std::path::Path;

use crate::error::WrtResult;

pub trait Minifier {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Combine `sources` (already read, in order) into the content of `output`
    fn minify(&self, output: &Path, sources: &[String]) -> WrtResult<String>;
}
