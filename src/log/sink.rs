use log::{Level, Metadata, Record};

/// Destination for the transport's leveled, structured log events.
///
/// Injected into a transport rather than looked up globally, so tests can
/// capture the event sequence without a logging backend.
pub trait LogSink: Send + Sync {
    fn log(&self, level: Level, message: &str, fields: &[(&str, &str)]);

    fn debug(&self, message: &str, fields: &[(&str, &str)]) {
        self.log(Level::Debug, message, fields);
    }

    fn error(&self, message: &str, fields: &[(&str, &str)]) {
        self.log(Level::Error, message, fields);
    }
}

/// Forwards events to the `log` facade, fields becoming key/value pairs.
#[derive(Debug, Clone, Copy)]
pub struct LogCrateSink {
    target: &'static str,
}

impl LogCrateSink {
    pub const DEFAULT_TARGET: &'static str = "paygate::transport";

    pub fn new(target: &'static str) -> Self {
        Self { target }
    }
}

impl Default for LogCrateSink {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TARGET)
    }
}

impl LogSink for LogCrateSink {
    fn log(&self, level: Level, message: &str, fields: &[(&str, &str)]) {
        let logger = log::logger();
        let metadata = Metadata::builder().level(level).target(self.target).build();
        if !logger.enabled(&metadata) {
            return;
        }
        logger.log(
            &Record::builder()
                .metadata(metadata)
                .args(format_args!("{}", message))
                .module_path_static(Some(module_path!()))
                .key_values(&fields)
                .build(),
        );
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn log(&self, _level: Level, _message: &str, _fields: &[(&str, &str)]) {}
}
