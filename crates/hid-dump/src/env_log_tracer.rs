use log::LevelFilter;

use crate::Error;

/// [`log::Log`] implementor that gates a [`tracing_log::LogTracer`] behind an [`env_logger::filter::Filter`]
pub struct EnvLogTracer {
    log_tracer: tracing_log::LogTracer,
    filter: env_logger::filter::Filter,
}

impl EnvLogTracer {
    pub fn new() -> Self {
        use env_logger::filter::Builder;
        let mut builder = Builder::new();

        // Parse a directives string from an environment variable
        match std::env::var("RUST_LOG") {
            Ok(ref filter) => {
                builder.parse(filter);
            }
            Err(_) => {
                builder.filter_level(LevelFilter::Warn);
            }
        }

        EnvLogTracer {
            log_tracer: tracing_log::LogTracer::new(),
            filter: builder.build(),
        }
    }

    pub fn max_level(&self) -> LevelFilter {
        self.filter.filter()
    }
}

impl log::Log for EnvLogTracer {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.filter.enabled(metadata)
    }

    fn log(&self, record: &log::Record) {
        if self.filter.matches(record) {
            self.log_tracer.log(record)
        }
    }

    fn flush(&self) {}
}

/// Install a stderr fmt subscriber and route `log` records into it
pub fn init() -> Result<(), Error> {
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let tracer = EnvLogTracer::new();
    log::set_max_level(tracer.max_level());
    log::set_boxed_logger(Box::new(tracer))?;

    Ok(())
}
