//! Debug viewer that runs a configured command
//!
//! The command template is split on whitespace; `%URL%` is replaced by the
//! debug URL, or the URL is appended when the template has no placeholder.

use std::process::{Command, Stdio};

use crate::domain::ports::DebugViewer;

const URL_PLACEHOLDER: &str = "%URL%";

#[derive(Debug, Clone)]
pub struct CommandViewer {
    template: String,
}

impl CommandViewer {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Program and arguments for `url`
    fn command_line(&self, url: &str) -> Vec<String> {
        let mut parts: Vec<String> = self
            .template
            .split_whitespace()
            .map(|part| part.replace(URL_PLACEHOLDER, url))
            .collect();
        if !parts.is_empty() && !self.template.contains(URL_PLACEHOLDER) {
            parts.push(url.to_string());
        }
        parts
    }
}

impl DebugViewer for CommandViewer {
    fn open(&self, url: &str) -> Result<(), String> {
        let parts = self.command_line(url);
        let (program, args) = parts
            .split_first()
            .ok_or_else(|| "viewer command is empty".to_string())?;

        // Not waited on; the viewer outlives the deployment run
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
            .map_err(|e| format!("failed to run '{}': {}", program, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_url_placeholder() {
        let viewer = CommandViewer::new("google-chrome --new-window %URL%");
        assert_eq!(
            viewer.command_line("http://localhost:8888/inspector.html?page=1"),
            [
                "google-chrome",
                "--new-window",
                "http://localhost:8888/inspector.html?page=1"
            ]
        );
    }

    #[test]
    fn appends_url_without_placeholder() {
        let viewer = CommandViewer::new("xdg-open");
        assert_eq!(viewer.command_line("http://x"), ["xdg-open", "http://x"]);
    }

    #[test]
    fn empty_template_fails() {
        let err = CommandViewer::new("  ").open("http://x").unwrap_err();
        assert!(err.contains("empty"));
    }

    #[test]
    fn missing_program_fails() {
        let err = CommandViewer::new("wrtpack-no-such-browser %URL%")
            .open("http://x")
            .unwrap_err();
        assert!(err.contains("wrtpack-no-such-browser"));
    }
}
