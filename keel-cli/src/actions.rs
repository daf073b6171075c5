//! Host automation output plumbing
//!
//! Step outputs and failures are reported using GitHub Actions conventions:
//! outputs are appended to the file named by `GITHUB_OUTPUT`, and failures are
//! printed as `::error::` workflow commands.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use uuid::Uuid;

/// Destination for named step outputs
pub trait OutputSink {
    /// Publishes one named output
    fn set_output(&mut self, name: &str, value: &str) -> Result<()>;
}

/// Writes outputs the way the Actions runner expects them
pub struct ActionsOutput {
    /// Output file; `None` falls back to the legacy stdout command
    file: Option<PathBuf>,
}

impl ActionsOutput {
    pub fn new(file: Option<PathBuf>) -> Self {
        Self { file }
    }
}

impl OutputSink for ActionsOutput {
    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        match &self.file {
            Some(path) => {
                let mut file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("Failed to open output file {}", path.display()))?;

                file.write_all(file_command(name, value).as_bytes())
                    .with_context(|| format!("Failed to write output {}", name))?;
            }
            None => {
                println!("::set-output name={}::{}", name, escape_data(value));
            }
        }

        Ok(())
    }
}

/// Formats an output as a delimited block for the output file
fn file_command(name: &str, value: &str) -> String {
    let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
    format!("{}<<{}\n{}\n{}\n", name, delimiter, value, delimiter)
}

/// Escapes a value for use in a workflow command
fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Reports a failed run as an error annotation
pub fn report_failure(err: &anyhow::Error) {
    println!("::error::{}", escape_data(&format!("{:#}", err)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_data() {
        assert_eq!(escape_data("a%b\r\nc"), "a%25b%0D%0Ac");
        assert_eq!(escape_data("web,sidecar"), "web,sidecar");
    }

    #[test]
    fn test_file_command_uses_unique_delimiter() {
        let block = file_command("task-definition", "/tmp/task-definition-abc.json");
        let lines: Vec<&str> = block.lines().collect();

        assert_eq!(lines.len(), 3);
        let delimiter = lines[0].strip_prefix("task-definition<<").unwrap();
        assert!(delimiter.starts_with("ghadelimiter_"));
        assert_eq!(lines[1], "/tmp/task-definition-abc.json");
        assert_eq!(lines[2], delimiter);
    }

    #[test]
    fn test_outputs_are_appended_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("github_output");
        std::fs::write(&path, "existing=1\n").unwrap();

        let mut sink = ActionsOutput::new(Some(path.clone()));
        sink.set_output("task-definition", "/tmp/td.json").unwrap();
        sink.set_output("container-definition-name", "web,sidecar").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "existing=1");
        assert!(lines[1].starts_with("task-definition<<ghadelimiter_"));
        assert_eq!(lines[2], "/tmp/td.json");
        assert!(lines[4].starts_with("container-definition-name<<"));
        assert_eq!(lines[5], "web,sidecar");
        assert_eq!(lines.len(), 7);
    }
}
