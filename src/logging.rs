use chrono::Local;
use log::{Level, Metadata, Record};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

pub struct Logger {
    file: Mutex<std::fs::File>,
    level: Level,
}

impl Logger {
    pub fn new(log_file: &Path, level: Level) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)?;

        Ok(Self {
            file: Mutex::new(file),
            level,
        })
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let mut file = self.file.lock().unwrap();
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
            writeln!(
                file,
                "{} [{}] {}",
                timestamp,
                record.level(),
                record.args()
            ).unwrap();
        }
    }

    fn flush(&self) {
        let mut file = self.file.lock().unwrap();
        file.flush().unwrap();
    }
}

pub fn init(log_file: &Path, debug: bool) -> Result<(), log::SetLoggerError> {
    let level = if debug { Level::Debug } else { Level::Info };
    let logger = Logger::new(log_file, level).expect("Failed to create logger");
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(level.to_level_filter());
    Ok(())
}
