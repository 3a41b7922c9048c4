//! Concatenating minifier
//!
//! Joins bundle inputs in order, trimming trailing whitespace from each.
//! Real minification is left to an external tool behind the same port.

use std::path::Path;

use crate::domain::ports::Minifier;
use crate::error::{WrtError, WrtResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct ConcatMinifier;

impl Minifier for ConcatMinifier {
    fn name(&self) -> &'static str {
        "concat"
    }

    fn minify(&self, output: &Path, sources: &[String]) -> WrtResult<String> {
        if sources.is_empty() {
            return Err(WrtError::Minify {
                output: output.to_path_buf(),
                message: "bundle has no inputs".to_string(),
            });
        }

        // Scripts get a statement terminator so bundles cannot fuse
        let separator = match output.extension().and_then(|e| e.to_str()) {
            Some("js") => ";\n",
            _ => "\n",
        };

        let mut bundle = sources
            .iter()
            .map(|s| s.trim_end())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(separator);
        bundle.push('\n');
        Ok(bundle)
    }
}
