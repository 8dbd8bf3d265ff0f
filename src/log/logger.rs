use crate::{
    config::Config,
    log::{log_level::LogLevel, log_msg::LogMsg, logger_handle::LoggerHandle},
};

use std::{
    fs::{self, OpenOptions},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    sync::mpsc::{self, Receiver, SyncSender, TrySendError},
    thread::{self, JoinHandle},
    time::{SystemTime, UNIX_EPOCH},
};

/// Flush every 100 lines while debugging so a crash loses little.
#[cfg(feature = "log-debug")]
const FLUSH_BATCH_SIZE: u32 = 100;

/// Flush every 1000 lines otherwise.
#[cfg(not(feature = "log-debug"))]
const FLUSH_BATCH_SIZE: u32 = 1_000;

/// After this many lines were refused by the UI queue, a summary line is sent.
const UI_DROP_REPORT_THRESHOLD: usize = 10;

/// Background file logger.
///
/// Producers enqueue [`LogMsg`] through a bounded channel (see
/// [`LoggerHandle`]); a `logger-worker` thread writes them to
/// `<name>-YYYYMMDD_HHMMSS-pid<N>.log` and forwards a sample to a second
/// channel that a UI can drain once per frame with [`try_recv_ui`](Self::try_recv_ui).
/// Warn and Error lines are always forwarded, the rest 1 out of `sample_every`.
pub struct Logger {
    handle: LoggerHandle,
    ui_log_rx: Receiver<String>,
    _thread: Option<JoinHandle<()>>,
    file_path: PathBuf,
}

impl Logger {
    /// Starts a logger using the `[Logging]` section of `config`.
    ///
    /// `log_path` selects the directory (a leading `~` is expanded) and
    /// `log_filename` the file prefix. Without `log_path` the default
    /// directory next to the executable is used.
    #[must_use]
    pub fn start_with_config(cap: usize, ui_cap: usize, sample_every: u32, config: &Config) -> Self {
        let app_name = config.get_non_empty("Logging", "log_filename");

        match config.get_non_empty("Logging", "log_path") {
            Some(dir_str) => {
                Self::start_in_dir(expand_path(dir_str), app_name, cap, ui_cap, sample_every)
            }
            None => Self::start_default(app_name, cap, ui_cap, sample_every),
        }
    }

    /// Starts a logger in a `logs/` directory next to the executable.
    #[must_use]
    pub fn start_default(
        app_name: Option<&str>,
        cap: usize,
        ui_cap: usize,
        sample_every: u32,
    ) -> Self {
        let base = exe_dir_fallback_cwd().join("logs");
        Self::start_in_dir(base, app_name, cap, ui_cap, sample_every)
    }

    /// Starts a logger writing into `dir`, creating it if needed.
    ///
    /// * `cap` - capacity of the producer queue.
    /// * `ui_cap` - capacity of the sampled UI queue.
    /// * `sample_every` - forward one Trace/Debug/Info line out of this many.
    pub fn start_in_dir<D: AsRef<Path>>(
        dir: D,
        app_name: Option<&str>,
        cap: usize,
        ui_cap: usize,
        sample_every: u32,
    ) -> Self {
        let dir = dir.as_ref().to_path_buf();
        let _ = fs::create_dir_all(&dir);

        let sample_every = sample_every.max(1);
        let ts = timestamp_for_filename();
        let pid = std::process::id();
        let fname = match app_name {
            Some(name) => format!("{name}-{ts}-pid{pid}.log"),
            None => format!("wandlink-{ts}-pid{pid}.log"),
        };
        let file_path = dir.join(fname);

        let (tx, rx) = mpsc::sync_channel::<LogMsg>(cap);
        let (ui_tx, ui_rx) = mpsc::sync_channel::<String>(ui_cap);

        let worker_path = file_path.clone();
        let _thread = thread::Builder::new()
            .name("logger-worker".into())
            .spawn(move || run_worker(&worker_path, &rx, &ui_tx, sample_every))
            .ok();

        Self {
            handle: LoggerHandle { tx },
            ui_log_rx: ui_rx,
            _thread,
            file_path,
        }
    }

    /// Enqueues a message without blocking; see [`LoggerHandle::try_log`].
    ///
    /// # Errors
    /// Returns the rejected message when the queue is full or the worker died.
    pub fn try_log<S: Into<String>>(
        &self,
        level: LogLevel,
        text: S,
        target: &'static str,
    ) -> Result<(), TrySendError<LogMsg>> {
        self.handle.try_log(level, text, target)
    }

    /// Returns a cloneable sink for worker threads.
    #[must_use]
    pub fn handle(&self) -> LoggerHandle {
        self.handle.clone()
    }

    /// Pops one sampled line for on-screen display, if any.
    #[must_use]
    pub fn try_recv_ui(&self) -> Option<String> {
        self.ui_log_rx.try_recv().ok()
    }

    /// Path of the active log file.
    #[must_use]
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

fn run_worker(path: &Path, rx: &Receiver<LogMsg>, ui_tx: &SyncSender<String>, sample_every: u32) {
    // Target file, then a temp-dir fallback, then nowhere. Never panic.
    let writer: Box<dyn Write + Send> =
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => Box::new(f),
            Err(_) => {
                let fallback = std::env::temp_dir().join("wandlink-fallback.log");
                match OpenOptions::new().create(true).append(true).open(&fallback) {
                    Ok(f) => Box::new(f),
                    Err(_) => Box::new(io::sink()),
                }
            }
        };
    let mut out = BufWriter::new(writer);

    let mut sampled: u32 = 0;
    let mut lines_written: u32 = 0;
    let mut dropped_to_ui: usize = 0;

    while let Ok(m) = rx.recv() {
        let _ = writeln!(&mut out, "[{}] {} {} | {}", m.level, m.ts_ms, m.target, m.text);
        lines_written = lines_written.wrapping_add(1);
        if lines_written % FLUSH_BATCH_SIZE == 0 {
            let _ = out.flush();
        }

        let forward = matches!(m.level, LogLevel::Warn | LogLevel::Error) || {
            sampled = sampled.wrapping_add(1);
            sampled % sample_every == 0
        };
        if forward && ui_tx.try_send(format!("[{}] {}", m.level, m.text)).is_err() {
            dropped_to_ui += 1;
        }
        if dropped_to_ui >= UI_DROP_REPORT_THRESHOLD {
            let _ = ui_tx.try_send(format!("(logger) UI log queue dropped {dropped_to_ui} lines"));
            dropped_to_ui = 0;
        }
    }

    let _ = out.flush();
}

/// Directory of the running executable, or the working directory.
fn exe_dir_fallback_cwd() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// `YYYYMMDD_HHMMSS` in UTC, or `unix_<secs>` if the date cannot be represented.
fn timestamp_for_filename() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    unix_to_utc(secs).map_or_else(
        || format!("unix_{secs}"),
        |tm| {
            format!(
                "{:04}{:02}{:02}_{:02}{:02}{:02}",
                tm.year, tm.mon, tm.day, tm.hour, tm.min, tm.sec
            )
        },
    )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct SimpleUtc {
    year: i32,
    mon: u32,
    day: u32,
    hour: u32,
    min: u32,
    sec: u32,
}

/// Civil-from-days conversion of a UNIX timestamp.
#[allow(clippy::many_single_char_names)]
fn unix_to_utc(secs: u64) -> Option<SimpleUtc> {
    let sec = (secs % 60) as u32;
    let min = (secs / 60 % 60) as u32;
    let hour = (secs / 3_600 % 24) as u32;
    let days = secs / 86_400;

    let z = i128::from(days) + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = yoe + era * 400 + i128::from(m <= 2);

    Some(SimpleUtc {
        year: i32::try_from(y).ok()?,
        mon: u32::try_from(m).ok()?,
        day: u32::try_from(d).ok()?,
        hour,
        min,
        sec,
    })
}

/// Expands a leading `~` to the user's home directory.
fn expand_path(path_str: &str) -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .ok()
        .map(PathBuf::from);

    match (path_str, home) {
        ("~", Some(home)) => home,
        (p, Some(home)) if p.starts_with("~/") || p.starts_with("~\\") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}
