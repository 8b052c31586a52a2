use crate::cli::{LogConfig, OutputFormat};
use chrono::{DateTime, Utc};
use crossterm::style::Stylize;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Debug,
    Info,
    Progress,
    Success,
    Warn,
    Error,
}

/// A single log event
#[derive(Clone, Debug, Serialize)]
pub struct Record {
    #[serde(rename = "type")]
    pub level: Level,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub timestamp: DateTime<Utc>,
}

/// Where log records end up
pub trait Sink {
    fn emit(&self, record: &Record);
}

/// Prints records to stdout, as prefixed text lines or as JSON objects
pub struct ConsoleSink {
    config: LogConfig,
}

impl ConsoleSink {
    pub fn new(config: LogConfig) -> Self {
        Self { config }
    }
}

impl Sink for ConsoleSink {
    fn emit(&self, record: &Record) {
        match self.config.output_format {
            OutputFormat::Json => {
                if let Ok(json) = serde_json::to_string(record) {
                    println!("{}", json);
                }
            }
            OutputFormat::Text => {
                let prefix = match record.level {
                    Level::Error => "[ERROR]",
                    Level::Warn => "[WARN]",
                    Level::Debug => "[DEBUG]",
                    Level::Progress => "[...]",
                    Level::Success => "[OK]",
                    Level::Info => "[INFO]",
                };
                if self.config.color {
                    let prefix = match record.level {
                        Level::Error => prefix.red(),
                        Level::Warn | Level::Progress => prefix.yellow(),
                        Level::Success => prefix.green(),
                        Level::Debug => prefix.dark_grey(),
                        Level::Info => prefix.magenta(),
                    };
                    println!("{} {}", prefix, record.message);
                } else {
                    println!("{} {}", prefix, record.message);
                }
            }
        }
    }
}

#[derive(Clone)]
pub struct Logger {
    config: LogConfig,
    sink: Rc<dyn Sink>,
}

impl Logger {
    pub fn new(config: LogConfig, sink: Rc<dyn Sink>) -> Self {
        Self { config, sink }
    }

    pub fn console(config: LogConfig) -> Self {
        Self::new(config, Rc::new(ConsoleSink::new(config)))
    }

    pub fn info(&self, message: &str) {
        if self.config.quiet {
            return;
        }
        self.output(Level::Info, message, None);
    }

    pub fn progress(&self, message: &str, path: &Path) {
        if self.config.quiet {
            return;
        }
        self.output(Level::Progress, message, Some(path));
    }

    pub fn success(&self, message: &str, path: &Path) {
        if self.config.quiet {
            return;
        }
        self.output(Level::Success, message, Some(path));
    }

    pub fn warn(&self, message: &str, path: &Path) {
        self.output(Level::Warn, message, Some(path));
    }

    pub fn error(&self, message: &str, path: &Path) {
        self.output(Level::Error, message, Some(path));
    }

    pub fn debug(&self, message: &str, path: &Path) {
        if !self.config.verbose {
            return;
        }
        self.output(Level::Debug, message, Some(path));
    }

    pub fn target_start(&self, path: &Path) {
        self.progress(&format!("Processing directory: {}", path.display()), path);
    }

    pub fn target_complete(&self, arg: &Path, path: &Path) {
        self.success(
            &format!(
                "All MP3 files in '{}' and its subdirectories have been updated.",
                arg.display()
            ),
            path,
        );
    }

    pub fn file_tagged(&self, path: &Path, album: &str) {
        self.debug(&format!("Tagged {} with album '{}'", path.display(), album), path);
    }

    pub fn file_failed(&self, path: &Path, err: &anyhow::Error) {
        self.error(
            &format!("Failed to update album tag for {}: {:#}", path.display(), err),
            path,
        );
    }

    pub fn subdirectory_complete(&self, parent: &Path, dir: &Path) {
        let name = dir.file_name().unwrap_or(dir.as_os_str());
        self.success(
            &format!(
                "Album tagging for {}/{} done.",
                parent.display(),
                name.to_string_lossy()
            ),
            dir,
        );
    }

    pub fn directory_revisited(&self, path: &Path) {
        self.warn(
            &format!("Skipping already visited directory: {}", path.display()),
            path,
        );
    }

    fn output(&self, level: Level, message: &str, path: Option<&Path>) {
        self.sink.emit(&Record {
            level,
            message: message.to_string(),
            path: path.map(Path::to_path_buf),
            timestamp: Utc::now(),
        });
    }
}

/// Keeps every record in memory so tests can assert on what was logged
#[cfg(test)]
#[derive(Default)]
pub struct MemorySink {
    records: std::cell::RefCell<Vec<Record>>,
}

#[cfg(test)]
impl MemorySink {
    pub fn records(&self) -> Vec<Record> {
        self.records.borrow().clone()
    }

    pub fn at(&self, level: Level) -> Vec<Record> {
        self.records
            .borrow()
            .iter()
            .filter(|r| r.level == level)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
impl Sink for MemorySink {
    fn emit(&self, record: &Record) {
        self.records.borrow_mut().push(record.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(config: LogConfig) -> (Logger, Rc<MemorySink>) {
        let sink = Rc::new(MemorySink::default());
        (Logger::new(config, sink.clone()), sink)
    }

    #[test]
    fn test_quiet_keeps_warnings_and_errors() {
        let config = LogConfig {
            quiet: true,
            ..LogConfig::default()
        };
        let (logger, sink) = capture(config);
        let path = Path::new("/music/a.mp3");

        logger.info("hello");
        logger.progress("working", path);
        logger.success("done", path);
        logger.debug("details", path);
        logger.warn("careful", path);
        logger.error("broken", path);

        let levels: Vec<_> = sink.records().iter().map(|r| r.level).collect();
        assert_eq!(levels, [Level::Warn, Level::Error]);
    }

    #[test]
    fn test_debug_needs_verbose() {
        let (logger, sink) = capture(LogConfig::default());
        logger.file_tagged(Path::new("a.mp3"), "Album");
        assert!(sink.records().is_empty());

        let config = LogConfig {
            verbose: true,
            ..LogConfig::default()
        };
        let (logger, sink) = capture(config);
        logger.file_tagged(Path::new("a.mp3"), "Album");
        assert_eq!(sink.at(Level::Debug).len(), 1);
    }

    #[test]
    fn test_records_carry_path() {
        let (logger, sink) = capture(LogConfig::default());
        let err = anyhow::anyhow!("disk on fire").context("writing ID3 tag");
        logger.file_failed(Path::new("/m/a.mp3"), &err);

        let records = sink.at(Level::Error);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].path.as_deref(), Some(Path::new("/m/a.mp3")));
        assert_eq!(
            records[0].message,
            "Failed to update album tag for /m/a.mp3: writing ID3 tag: disk on fire"
        );
    }

    #[test]
    fn test_subdirectory_message() {
        let (logger, sink) = capture(LogConfig::default());
        logger.subdirectory_complete(Path::new("/music/Artist"), Path::new("/music/Artist/Album"));
        assert_eq!(
            sink.records()[0].message,
            "Album tagging for /music/Artist/Album done."
        );
    }

    #[test]
    fn test_json_record_shape() {
        let record = Record {
            level: Level::Success,
            message: "done".to_string(),
            path: None,
            timestamp: Utc::now(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["type"], "success");
        assert_eq!(value["message"], "done");
        assert!(value.get("path").is_none());
        assert!(value["timestamp"].is_string());
    }
}
