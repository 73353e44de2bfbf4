// Diagnostics output of the reporter itself (not the per-node log files)

use chrono::Local;
use tracing::{Event, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Directive used by `--verbose`
pub const VERBOSE_FILTER: &str = "teacup_report=debug,warn";

pub struct DiagnosticFormatter;

impl<S, N> FormatEvent<S, N> for DiagnosticFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let timestamp = Local::now().format("%H:%M:%S%.3f");

        write!(
            writer,
            "{:<5} [{}] {}: ",
            metadata.level().as_str(),
            timestamp,
            metadata.target()
        )?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over `default_filter`.
pub fn init(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A host that already installed a subscriber keeps it.
    let _ = tracing_subscriber::fmt()
        .event_format(DiagnosticFormatter)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
