use crate::domain::model::HttpMethod;
use crate::domain::ports::ResponseLog;
use crate::utils::error::{HarnessError, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// 組出單行日誌；body 內的換行會被轉義，確保一次請求只佔一行
pub fn format_line(method: HttpMethod, body: &str) -> String {
    let flattened = body.replace('\r', "\\r").replace('\n', "\\n");
    format!("{} Response: {}", method, flattened)
}

/// Appends response lines to a file, `app.log` by default.
#[derive(Debug, Clone)]
pub struct FileResponseLog {
    path: PathBuf,
}

impl FileResponseLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ResponseLog for FileResponseLog {
    fn append(&self, method: HttpMethod, body: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", format_line(method, body))?;
        Ok(())
    }
}

/// 測試用：把日誌行留在記憶體
#[derive(Debug, Default)]
pub struct MemoryResponseLog {
    lines: Mutex<Vec<String>>,
}

impl MemoryResponseLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }
}

impl ResponseLog for MemoryResponseLog {
    fn append(&self, method: HttpMethod, body: &str) -> Result<()> {
        let mut lines = self
            .lines
            .lock()
            .map_err(|e| HarnessError::ResponseLogError {
                message: format!("memory log lock poisoned: {}", e),
            })?;
        lines.push(format_line(method, body));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_line() {
        assert_eq!(
            format_line(HttpMethod::Get, r#"{"id":3}"#),
            r#"GET Response: {"id":3}"#
        );
        assert_eq!(
            format_line(HttpMethod::Post, "{\n  \"id\": 1\n}"),
            "POST Response: {\\n  \"id\": 1\\n}"
        );
    }

    #[test]
    fn test_file_log_appends_one_line_per_call() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("logs").join("app.log");
        let log = FileResponseLog::new(&path);

        log.append(HttpMethod::Post, r#"{"id":21}"#).unwrap();
        log.append(HttpMethod::Delete, "").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec![r#"POST Response: {"id":21}"#, "DELETE Response: "]);
    }

    #[test]
    fn test_memory_log() {
        let log = MemoryResponseLog::new();
        log.append(HttpMethod::Put, "ok").unwrap();
        assert_eq!(log.lines(), vec!["PUT Response: ok".to_string()]);
    }

    #[test]
    fn test_memory_log_reports_poisoned_lock() {
        let log = std::sync::Arc::new(MemoryResponseLog::new());

        // 持鎖的執行緒 panic 後，鎖會被標記為 poisoned
        let poisoner = std::sync::Arc::clone(&log);
        let joined = std::thread::spawn(move || {
            let _guard = poisoner.lines.lock().unwrap();
            panic!("poison the memory log");
        })
        .join();
        assert!(joined.is_err());

        let err = log.append(HttpMethod::Get, "lost").unwrap_err();
        assert!(matches!(err, HarnessError::ResponseLogError { .. }));
    }
}
