use core::default::Default;
use std::{
    fs::{File, create_dir_all},
    io::{self, Write as _},
    path::PathBuf,
    sync::mpsc::{Receiver, Sender, channel},
    thread::{self, JoinHandle},
    time::SystemTime,
};

use clap::ValueEnum;
use log::{LevelFilter, Log, Record};

use crate::util::{ResultExtToIoError, SystemTimeExt};

/// Verbosity chosen on the command line. `Full` is `Trace` with the target prefix filter lifted,
/// so dependency crates log too.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
    Full,
}

impl LogLevel {
    pub fn level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace | LogLevel::Full => LevelFilter::Trace,
        }
    }

    pub fn ignores_prefixes(self) -> bool {
        self == LogLevel::Full
    }
}

enum MessageEvent {
    Message(String),
    Flush(Sender<()>),
}

/// Writes log records from a background thread. Stdout carries the spiral, so everything goes to
/// stderr, plus a log file when a path is given.
pub struct Logger {
    join_handle: Option<JoinHandle<()>>,
    message_sender: Option<Sender<MessageEvent>>,
    level_filter: LevelFilter,
    full_logs: bool,
    prefixes: Vec<String>,
}

impl Logger {
    pub fn install(self) -> Result<(), io::Error> {
        let level = self.level_filter;
        log::set_boxed_logger(Box::new(self))
            .map(|_| log::set_max_level(level))
            .to_ioerror()
    }

    fn new(
        log_dir: Option<PathBuf>,
        level: LogLevel,
        prefixes: Vec<String>,
    ) -> Result<Logger, io::Error> {
        let file = log_dir
            .map(|mut path| {
                let now = SystemTime::now();
                path.push(now.strftime("%Y-%m-%d"));
                create_dir_all(&path)?;
                path.push(now.strftime("%H-%M-%S.log"));
                File::create(path)
            })
            .transpose()?;
        let (message_sender, message_receiver) = channel();
        let message_sender = Some(message_sender);
        let join_handle = thread::spawn(move || Logger::writer_thread(file, message_receiver));
        let join_handle = Some(join_handle);
        Ok(Logger {
            join_handle,
            message_sender,
            level_filter: level.level_filter(),
            full_logs: level.ignores_prefixes(),
            prefixes,
        })
    }

    fn writer_thread(mut file: Option<File>, message_receiver: Receiver<MessageEvent>) {
        for message in message_receiver {
            match message {
                MessageEvent::Message(text) => {
                    eprintln!("{text}");
                    if let Some(file) = &mut file {
                        let _ = writeln!(file, "{text}");
                    }
                }
                MessageEvent::Flush(ack) => {
                    if let Some(file) = &mut file {
                        let _ = file.flush();
                    }
                    let _ = io::stderr().flush();
                    let _ = ack.send(());
                }
            }
        }
    }

    fn send(&self, event: MessageEvent) -> bool {
        self.message_sender
            .as_ref()
            .is_some_and(|sender| sender.send(event).is_ok())
    }
}

impl Log for Logger {
    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let timestamp = SystemTime::now().strftime("%H:%M:%S%.3f");
        let log_str = format!(
            "[{}|{}|{}{}] {}",
            record.level(),
            timestamp,
            record.target(),
            record.line().map(|x| format!(":{x}")).unwrap_or_default(),
            record.args()
        );
        self.send(MessageEvent::Message(log_str));
    }

    fn enabled(&self, metadata: &log::Metadata) -> bool {
        (self.full_logs
            || self.prefixes.is_empty()
            || self
                .prefixes
                .iter()
                .any(|prefix| metadata.target().starts_with(prefix)))
            && metadata.level() <= self.level_filter
    }

    /// Blocks until every record sent so far has been written.
    fn flush(&self) {
        let (ack_sender, ack_receiver) = channel();
        if self.send(MessageEvent::Flush(ack_sender)) {
            let _ = ack_receiver.recv();
        }
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        drop(self.message_sender.take());
        if let Some(join_handle) = self.join_handle.take() {
            let _ = join_handle.join();
        }
    }
}

/// Collects logger settings; nothing is spawned until `build`.
#[derive(Default)]
pub struct LoggerBuilder {
    log_dir: Option<PathBuf>,
    level: LogLevel,
    prefixes: Vec<String>,
}

impl LoggerBuilder {
    pub fn new() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    /// Directory that receives `<date>/<time>.log`; `None` logs to stderr only.
    pub fn log_dir(mut self, log_dir: Option<PathBuf>) -> Self {
        self.log_dir = log_dir;
        self
    }

    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Only targets starting with one of the prefixes are logged, unless the level is `Full`.
    pub fn target_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefixes.push(prefix.into());
        self
    }

    pub fn build(self) -> Result<Logger, io::Error> {
        Logger::new(self.log_dir, self.level, self.prefixes)
    }

    pub fn install(self) -> Result<(), io::Error> {
        self.build()?.install()
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use log::{Level, Metadata};

    use super::*;

    fn metadata(target: &str, level: Level) -> Metadata<'_> {
        Metadata::builder().target(target).level(level).build()
    }

    #[test]
    fn filters_by_level() {
        let logger = LoggerBuilder::new().level(LogLevel::Info).build().unwrap();
        assert!(logger.enabled(&metadata("ulam_spiral", Level::Warn)));
        assert!(logger.enabled(&metadata("ulam_spiral", Level::Info)));
        assert!(!logger.enabled(&metadata("ulam_spiral", Level::Debug)));
    }

    #[test]
    fn off_disables_everything() {
        let logger = LoggerBuilder::new().level(LogLevel::Off).build().unwrap();
        assert!(!logger.enabled(&metadata("ulam_spiral", Level::Error)));
    }

    #[test]
    fn prefixes_restrict_targets_unless_full() {
        let logger = LoggerBuilder::new()
            .level(LogLevel::Trace)
            .target_prefix("ulam_spiral")
            .build()
            .unwrap();
        assert!(logger.enabled(&metadata("ulam_spiral::spiral", Level::Trace)));
        assert!(!logger.enabled(&metadata("csv", Level::Error)));

        let logger = LoggerBuilder::new()
            .level(LogLevel::Full)
            .target_prefix("ulam_spiral")
            .build()
            .unwrap();
        assert!(logger.enabled(&metadata("csv", Level::Trace)));
    }

    #[test]
    fn default_level_is_warn() {
        let logger = LoggerBuilder::new().build().unwrap();
        assert!(logger.enabled(&metadata("ulam_spiral", Level::Warn)));
        assert!(!logger.enabled(&metadata("ulam_spiral", Level::Info)));
    }

    #[test]
    fn writes_dated_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let logger = LoggerBuilder::new()
            .level(LogLevel::Info)
            .log_dir(Some(dir.path().to_path_buf()))
            .build()
            .unwrap();
        logger.log(
            &Record::builder()
                .args(format_args!("grid filled"))
                .level(Level::Info)
                .target("ulam_spiral::spiral")
                .build(),
        );
        logger.flush();

        let date_dir = fs::read_dir(dir.path()).unwrap().next().unwrap().unwrap();
        let log_file = fs::read_dir(date_dir.path())
            .unwrap()
            .next()
            .unwrap()
            .unwrap();
        assert!(log_file.path().extension().is_some_and(|ext| ext == "log"));
        let contents = fs::read_to_string(log_file.path()).unwrap();
        assert!(contents.starts_with("[INFO|"));
        assert!(contents.contains("ulam_spiral::spiral] grid filled"));
    }
}
