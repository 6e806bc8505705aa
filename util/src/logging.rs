use std::{
    fmt,
    fs::{create_dir_all, read_dir, remove_file, rename, File},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Mutex as StdMutex,
    thread,
};

use chrono::prelude::*;
use flate2::{write::GzEncoder, Compression};
use log::*;
use log4rs::{
    append::{
        rolling_file::{
            policy::compound::{roll::Roll, trigger::Trigger, CompoundPolicy},
            LogFile,
            RollingFileAppender,
        },
        Append,
    },
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::{Filter, Response},
};

#[cfg(unix)]
use termion::color;

const FILE_SIZE_LIMIT: u64 = 50_000_000;
const LATEST_LOG: &str = "latest.log";
const TEMP_LOG: &str = "latest-tmp.log";

/// The level used when the configuration does not name one.
#[cfg(debug_assertions)]
pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::Debug;
/// The level used when the configuration does not name one.
#[cfg(not(debug_assertions))]
pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::Info;

/// Configures log4rs with a colored console appender and a rolling file appender.
///
/// Console messages are in the form `[HH:MM:SS Level]: message`. Debug and trace records are only
/// accepted if their module path starts with `crate_filter`, everything else passes through.
///
/// Logs are written to `<log_dir>/latest.log`. When a new day starts or the file grows past 50MB
/// it is compressed into `<log_dir>/yyyy-mm-dd-N.log.gz`.
pub fn init_logger(crate_filter: &str, log_dir: &Path, level: LevelFilter) -> anyhow::Result<()> {
    create_dir_all(log_dir)?;

    let logfile = RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new("[{d(%H:%M:%S)} {l}]: {m}\n")))
        .build(
            log_dir.join(LATEST_LOG),
            Box::new(CompoundPolicy::new(
                Box::new(DailySizeTrigger::new(FILE_SIZE_LIMIT)),
                Box::new(GzLogRoller::new(log_dir)),
            )),
        )?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(CrateFilter::new(crate_filter)))
                .build("console", Box::new(ConsoleAppender)),
        )
        .appender(
            Appender::builder()
                .filter(Box::new(CrateFilter::new(crate_filter)))
                .build("logfile", Box::new(logfile)),
        )
        .build(
            Root::builder()
                .appender("console")
                .appender("logfile")
                .build(level),
        )?;

    log4rs::init_config(config)?;

    Ok(())
}

/// Compresses the current log file. Call this right before the process exits.
pub fn cleanup(log_dir: &Path) {
    // Nothing useful can be done with a failure this late
    let _ = GzLogRoller::new(log_dir).roll_threaded(&log_dir.join(LATEST_LOG), false);
}

struct CrateFilter {
    prefix: String,
}

impl CrateFilter {
    fn new(prefix: &str) -> Self {
        CrateFilter {
            prefix: prefix.to_owned(),
        }
    }

    fn accepts(&self, level: Level, module_path: Option<&str>) -> bool {
        if level != Level::Debug && level != Level::Trace {
            return true;
        }

        module_path
            .map(|path| path.starts_with(&self.prefix))
            .unwrap_or(false)
    }
}

impl Filter for CrateFilter {
    fn filter(&self, record: &Record) -> Response {
        if self.accepts(record.level(), record.module_path()) {
            Response::Neutral
        } else {
            Response::Reject
        }
    }
}

impl fmt::Debug for CrateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CrateFilter({})", self.prefix)
    }
}

struct ConsoleAppender;

impl Append for ConsoleAppender {
    #[cfg(unix)]
    fn append(&self, record: &Record) -> anyhow::Result<()> {
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        match record.metadata().level() {
            Level::Error => write!(writer, "{}", color::Fg(color::Red))?,
            Level::Warn => write!(writer, "{}", color::Fg(color::LightYellow))?,
            Level::Debug => write!(writer, "{}", color::Fg(color::LightCyan))?,
            _ => write!(writer, "{}", color::Fg(color::Reset))?,
        }
        writeln!(
            writer,
            "[{} {}]: {}{}",
            Local::now().format("%H:%M:%S"),
            record.metadata().level(),
            record.args(),
            color::Fg(color::Reset)
        )?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn append(&self, record: &Record) -> anyhow::Result<()> {
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        writeln!(
            writer,
            "[{} {}]: {}",
            Local::now().format("%H:%M:%S"),
            record.metadata().level(),
            record.args()
        )?;
        Ok(())
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
    }
}

impl fmt::Debug for ConsoleAppender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ConsoleAppender")
    }
}

// Fires when the log file gets too large or a new day starts
struct DailySizeTrigger {
    last_day: StdMutex<u32>,
    max_size: u64,
}

impl DailySizeTrigger {
    fn new(max_size: u64) -> Self {
        DailySizeTrigger {
            last_day: StdMutex::new(Local::now().ordinal()),
            max_size,
        }
    }
}

impl fmt::Debug for DailySizeTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DailySizeTrigger({})", self.max_size)
    }
}

impl Trigger for DailySizeTrigger {
    fn trigger(&self, file: &LogFile) -> anyhow::Result<bool> {
        if let Ok(mut guard) = self.last_day.lock() {
            let current_day = Local::now().ordinal();
            if current_day != *guard {
                *guard = current_day;
                return Ok(true);
            }
        }

        Ok(file.len_estimate() > self.max_size)
    }
}

struct GzLogRoller {
    log_dir: PathBuf,
    // Current day, log count for today
    name_info: StdMutex<(u32, u32)>,
}

impl GzLogRoller {
    fn new(log_dir: &Path) -> Self {
        let today = format!("{}", Local::now().format("%Y-%m-%d"));
        let mut max_index = 0;

        if let Ok(paths) = read_dir(log_dir) {
            for name in paths
                .flatten()
                .filter_map(|entry| entry.file_name().into_string().ok())
                .filter(|name| name.starts_with(&today))
            {
                if let Some(index) = index_from_name(&name) {
                    max_index = max_index.max(index);
                }
            }
        }

        GzLogRoller {
            log_dir: log_dir.to_owned(),
            name_info: StdMutex::new((Local::now().ordinal(), max_index)),
        }
    }

    fn roll_threaded(&self, file: &Path, threaded: bool) -> anyhow::Result<()> {
        let mut guard = self
            .name_info
            .lock()
            .map_err(|_| anyhow::anyhow!("log roller mutex poisoned"))?;

        let local_datetime = Local::now();
        if local_datetime.ordinal() != guard.0 {
            guard.0 = local_datetime.ordinal();
            guard.1 = 1;
        } else {
            guard.1 += 1;
        }

        // Move the file out of the way first in case compression takes a while
        let temp = self.log_dir.join(TEMP_LOG);
        rename(file, &temp)?;

        let output = self.log_dir.join(archive_name(
            &local_datetime.format("%Y-%m-%d").to_string(),
            guard.1,
        ));

        if threaded {
            thread::spawn(move || try_compress_log(&temp, &output));
        } else {
            try_compress_log(&temp, &output);
        }

        Ok(())
    }
}

impl Roll for GzLogRoller {
    fn roll(&self, file: &Path) -> anyhow::Result<()> {
        self.roll_threaded(file, true)
    }
}

impl fmt::Debug for GzLogRoller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GzLogRoller({})", self.log_dir.display())
    }
}

fn archive_name(date: &str, index: u32) -> String {
    format!("{}-{}.log.gz", date, index)
}

// Parses N out of `yyyy-mm-dd-N.log.gz`
fn index_from_name(name: &str) -> Option<u32> {
    let dot_index = name.find('.')?;
    let dash_index = name[.. dot_index].rfind('-')?;
    name[dash_index + 1 .. dot_index].parse::<u32>().ok()
}

fn try_compress_log(input_path: &Path, output_path: &Path) {
    if let Err(e) = compress_log(input_path, output_path) {
        error!("Failed to compress log file: {}", e);
    }
}

// Removes the source once the compressed copy is written
fn compress_log(input_path: &Path, output_path: &Path) -> io::Result<()> {
    let mut input = File::open(input_path)?;
    let mut output = GzEncoder::new(File::create(output_path)?, Compression::default());
    io::copy(&mut input, &mut output)?;
    drop(output.finish()?);
    // Some platforms refuse to delete an open file
    drop(input);
    remove_file(input_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archive_index_parsing() {
        assert_eq!(index_from_name("2024-03-09-1.log.gz"), Some(1));
        assert_eq!(index_from_name("2024-03-09-17.log.gz"), Some(17));
        assert_eq!(index_from_name(&archive_name("2024-03-09", 4)), Some(4));
        assert_eq!(index_from_name("latest.log"), None);
        assert_eq!(index_from_name("2024-03-09-.log.gz"), None);
    }

    #[test]
    fn crate_filter_only_limits_debug_output() {
        let filter = CrateFilter::new("sponge");

        assert!(filter.accepts(Level::Info, Some("other::module")));
        assert!(filter.accepts(Level::Error, None));
        assert!(filter.accepts(Level::Debug, Some("sponge::world")));
        assert!(!filter.accepts(Level::Debug, Some("other::module")));
        assert!(!filter.accepts(Level::Trace, None));
    }

    #[test]
    fn compress_removes_source() {
        let dir = std::env::temp_dir().join(format!("sponge-log-test-{}", std::process::id()));
        create_dir_all(&dir).unwrap();
        let input = dir.join("input.log");
        let output = dir.join("output.log.gz");
        std::fs::write(&input, b"[00:00:00 INFO]: hello\n").unwrap();

        compress_log(&input, &output).unwrap();

        assert!(!input.exists(), "Source log was not removed.");
        assert!(output.exists(), "Compressed log was not written.");
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
