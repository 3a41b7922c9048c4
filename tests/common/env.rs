//! Test environment builder for isolated wrtpack runs.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

use super::fixtures;

/// Result of running a wrtpack command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated project directory with helpers to run the CLI in it
pub struct TestEnv {
    pub project_root: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::default()
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Run wrtpack from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run wrtpack from the project root with extra env vars
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.project_root.path())
            .args(args)
            .env_remove("WRTPACK_LOG")
            .env_remove("WRTPACK_BUILD_DIR")
            .env_remove("WRTPACK_SDB")
            .env_remove("WRTPACK_DEBUG_PORT")
            .env_remove("WRTPACK_APP_ID");

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute wrtpack");
        Self::output_to_result(output)
    }

    fn output_to_result(output: Output) -> TestResult {
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    pub fn read_project_file(&self, relative: &str) -> String {
        std::fs::read_to_string(self.project_path(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    pub fn read_project_bytes(&self, relative: &str) -> Vec<u8> {
        std::fs::read(self.project_path(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    pub fn write_project_file(&self, relative: &str, content: &[u8]) {
        write_file(&self.project_path(relative), content);
    }

    pub fn remove_project_file(&self, relative: &str) {
        std::fs::remove_file(self.project_path(relative)).expect("Failed to remove file");
    }
}

fn write_file(path: &Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create directories");
    }
    std::fs::write(path, content).expect("Failed to write file");
}

/// Builder for TestEnv with fluent API
#[derive(Default)]
pub struct TestEnvBuilder {
    web_app: bool,
    config: Option<String>,
    files: Vec<(String, Vec<u8>)>,
}

impl TestEnvBuilder {
    /// Populate the project with the fixture web application
    pub fn with_web_app(mut self) -> Self {
        self.web_app = true;
        self
    }

    /// Write `wrtpack.toml`
    pub fn with_config(mut self, toml: &str) -> Self {
        self.config = Some(toml.to_string());
        self
    }

    pub fn with_file(mut self, relative: &str, content: &[u8]) -> Self {
        self.files.push((relative.to_string(), content.to_vec()));
        self
    }

    pub fn build(self) -> TestEnv {
        let project_root = tempfile::tempdir().expect("Failed to create temp dir");
        let root = project_root.path();

        if self.web_app {
            for (relative, content) in fixtures::web_app() {
                write_file(&root.join(relative), content);
            }
        }
        if let Some(config) = &self.config {
            write_file(&root.join("wrtpack.toml"), config.as_bytes());
        }
        for (relative, content) in &self.files {
            write_file(&root.join(relative), content);
        }

        TestEnv {
            project_root,
            bin: PathBuf::from(env!("CARGO_BIN_EXE_wrtpack")),
        }
    }
}
