use std::fs::File;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Initialize logging: warnings to stderr (everything with `verbose`) and a
/// debug log appended to ~/.local/share/roam-bridge/bridge.log.
/// Best-effort: a missing HOME or unwritable file only drops the file sink.
pub fn init(verbose: bool) {
    let term_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        term_level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    if let Some(file) = open_log_file() {
        loggers.push(WriteLogger::new(LevelFilter::Debug, Config::default(), file));
    }
    // a second init (tests, embedding callers) keeps the first logger
    let _ = CombinedLogger::init(loggers);
}

fn open_log_file() -> Option<File> {
    let home = std::env::var_os("HOME")?;
    let log_dir = PathBuf::from(home).join(".local/share/roam-bridge");
    std::fs::create_dir_all(&log_dir).ok()?;
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("bridge.log"))
        .ok()
}

/// A UTC wall-clock reading split into `YYYY-MM-DD` and `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    pub date: String,
    pub time: String,
}

impl Stamp {
    pub fn now() -> Self {
        Self::at(SystemTime::now())
    }

    pub fn at(when: SystemTime) -> Self {
        let secs = when
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let days = secs / 86400;
        let rem = secs % 86400;
        let (year, month, day) = epoch_days_to_date(days);
        Self {
            date: format!("{year:04}-{month:02}-{day:02}"),
            time: format!("{:02}:{:02}", rem / 3600, (rem % 3600) / 60),
        }
    }
}

/// Convert days since Unix epoch to (year, month, day).
fn epoch_days_to_date(days: u64) -> (u64, u64, u64) {
    // Civil calendar from days algorithm (Howard Hinnant)
    let z = days + 719468;
    let era = z / 146097;
    let doe = z - era * 146097;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y, m, d)
}
