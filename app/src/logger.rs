use core::fmt::Write;

use cortex_m_semihosting::hprintln;
use log::{LevelFilter, Log, Metadata, Record};

struct SemihostingLogger;

static LOGGER: SemihostingLogger = SemihostingLogger;

impl Log for SemihostingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut line = heapless::String::<128>::new();
        if write!(line, "{:<5} {}", record.level(), record.args()).is_err() {
            let _ = line.push_str("~");
        }
        hprintln!("{}", line);
    }

    fn flush(&self) {}
}

pub fn init() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }
}
