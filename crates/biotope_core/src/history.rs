use crate::error::{BiotopeError, Result};
pub use biotope_data::LiveEvent;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// RFC 3339 wall-clock time stamped on every event.
pub fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Appends live events as JSON lines to `<log_dir>/live.jsonl`.
pub struct HistoryLogger {
    live_file: Option<BufWriter<File>>,
    log_dir: PathBuf,
}

impl HistoryLogger {
    pub fn new() -> Result<Self> {
        Self::new_at("logs")
    }

    pub fn new_at<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.exists() {
            std::fs::create_dir_all(dir)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("live.jsonl"))?;
        Ok(Self {
            live_file: Some(BufWriter::new(file)),
            log_dir: dir.to_path_buf(),
        })
    }

    /// A logger that discards everything.
    pub fn new_dummy() -> Self {
        Self {
            live_file: None,
            log_dir: PathBuf::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.live_file.is_some()
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn log_event(&mut self, event: &LiveEvent) -> Result<()> {
        self.log_events(std::slice::from_ref(event))
    }

    /// Writes a batch and flushes once at the end.
    pub fn log_events(&mut self, events: &[LiveEvent]) -> Result<()> {
        let Some(ref mut file) = self.live_file else {
            return Ok(());
        };
        for ev in events {
            let json = serde_json::to_string(ev)?;
            writeln!(file, "{}", json).map_err(|e| {
                BiotopeError::telemetry(format!("write to live.jsonl failed: {e}"))
            })?;
        }
        file.flush()
            .map_err(|e| BiotopeError::telemetry(format!("flush of live.jsonl failed: {e}")))
    }

    /// Reads every well-formed event back. Malformed lines are skipped.
    pub fn read_events(&self) -> Result<Vec<LiveEvent>> {
        if !self.is_enabled() {
            return Ok(Vec::new());
        }
        read_events_from(self.log_dir.join("live.jsonl"))
    }
}

/// Reads a `live.jsonl` file. A missing file yields no events; malformed
/// lines are skipped.
pub fn read_events_from<P: AsRef<Path>>(path: P) -> Result<Vec<LiveEvent>> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    let reader = BufReader::new(file);
    let mut events = Vec::new();
    for line in reader.lines().map_while(std::result::Result::ok) {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<LiveEvent>(&line) {
            Ok(ev) => events.push(ev),
            Err(e) => tracing::debug!(error = %e, "Skipping malformed telemetry line"),
        }
    }
    Ok(events)
}
