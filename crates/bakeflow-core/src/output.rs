//! Workflow output
//!
//! The only externally observable result of a workflow: an ordered,
//! flat set of `key=value` lines appended to the sink designated by
//! the CI runner (`GITHUB_OUTPUT`). Line-oriented UTF-8 with no
//! escaping; values are assumed newline-free.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct WorkflowOutput {
    entries: Vec<(String, String)>,
}

impl WorkflowOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key, preserving first-insertion order on overwrite.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as `key=value` lines, one entry per line.
    pub fn to_lines(&self) -> String {
        let mut lines = String::new();
        for (key, value) in self.iter() {
            lines.push_str(key);
            lines.push('=');
            lines.push_str(value);
            lines.push('\n');
        }
        lines
    }
}

/// Where output lines are appended.
#[derive(Debug, Clone)]
pub enum OutputSink {
    /// CI output file (the `GITHUB_OUTPUT` contract).
    File(PathBuf),
    /// No file designated; lines go to stdout.
    Stdout,
}

impl OutputSink {
    /// Resolve the sink from the `GITHUB_OUTPUT` environment variable.
    pub fn from_env() -> Self {
        match std::env::var("GITHUB_OUTPUT") {
            Ok(path) if !path.trim().is_empty() => Self::File(PathBuf::from(path)),
            _ => Self::Stdout,
        }
    }

    /// Append the output; earlier content in the sink is kept.
    pub fn append(&self, output: &WorkflowOutput) -> std::io::Result<()> {
        match self {
            Self::File(path) => {
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                file.write_all(output.to_lines().as_bytes())?;
            }
            Self::Stdout => {
                print!("{}", output.to_lines());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_keep_insertion_order() {
        let mut output = WorkflowOutput::new();
        output.set("instance_id", "abc-123");
        output.set("instance_ip", "10.0.0.4");
        output.set("instance_name", "app-build-20260401-120000");

        assert_eq!(
            output.to_lines(),
            "instance_id=abc-123\n\
             instance_ip=10.0.0.4\n\
             instance_name=app-build-20260401-120000\n"
        );
    }

    #[test]
    fn overwrite_keeps_position() {
        let mut output = WorkflowOutput::new();
        output.set("a", "1");
        output.set("b", "2");
        output.set("a", "3");

        assert_eq!(output.to_lines(), "a=3\nb=2\n");
        assert_eq!(output.get("a"), Some("3"));
    }

    #[test]
    fn file_sink_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("github_output");
        let sink = OutputSink::File(path.clone());

        let mut first = WorkflowOutput::new();
        first.set("image_id", "abc-123");
        sink.append(&first).unwrap();

        let mut second = WorkflowOutput::new();
        second.set("target_image_id", "def-456");
        sink.append(&second).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "image_id=abc-123\ntarget_image_id=def-456\n");
    }
}
