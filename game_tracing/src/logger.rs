//! Process-wide log output.
//!
//! The [`Logger`] is a [`Layer`] that writes every event to stdout with a timestamp, level and
//! module path. Filters are read from the `RUST_LOG` environment variable, as a comma separated
//! list of `level` and `target=level` directives:
//!
//! ```text
//! RUST_LOG=warn,game_touch_controls=debug
//! ```

use std::fmt::{self, Debug, Display, Formatter, Write};
use std::io::IsTerminal;

use chrono::Local;
use tracing::field::{Field, Visit};
use tracing::metadata::LevelFilter;
use tracing::subscriber::{set_global_default, SetGlobalDefaultError};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

/// Installs the [`Logger`] as the global default subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber was already installed.
pub fn init() -> Result<(), SetGlobalDefaultError> {
    let subscriber = tracing_subscriber::registry().with(Logger::new());
    set_global_default(subscriber)
}

#[derive(Debug)]
pub struct Logger {
    is_tty: bool,
    filter: Filter,
}

impl Logger {
    pub fn new() -> Self {
        let filter = std::env::var("RUST_LOG")
            .map(|e| Filter::parse(&e))
            .unwrap_or_default();

        Self::with_filter(filter)
    }

    pub fn with_filter(filter: Filter) -> Self {
        Self {
            is_tty: std::io::stdout().is_terminal(),
            filter,
        }
    }

    #[inline]
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    fn log<T>(&self, level: Level, target: &str, content: T)
    where
        T: Display,
    {
        let now = Local::now().format("%Y-%m-%d %H:%M:%S:%f");

        let (name, color) = match level {
            Level::ERROR => ("ERROR", Color::RED),
            Level::WARN => ("WARN", Color::YELLOW),
            Level::INFO => ("INFO", Color::GREEN),
            Level::DEBUG => ("DEBUG", Color::LIGHT_GRAY_BOLD),
            Level::TRACE => ("TRACE", Color::LIGHT_GRAY_BOLD),
        };

        if self.is_tty {
            println!(
                "{} {} {} {}",
                ColorText::new(format!("[{}]", now), Color::LIGHT_GRAY),
                ColorText::new(name, color),
                ColorText::new(target, Color::LIGHT_GRAY),
                content
            );
        } else {
            println!("[{}] {} {} {}", now, name, target, content);
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for Logger
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        if !self.filter.enabled(meta.target(), *meta.level()) {
            return;
        }

        let mut visitor = Visitor::new();
        event.record(&mut visitor);

        self.log(*meta.level(), meta.module_path().unwrap_or("???"), visitor);
    }
}

/// A set of per-target level filters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filter {
    default: LevelFilter,
    /// `(target prefix, level)` pairs, longest prefix first.
    targets: Vec<(String, LevelFilter)>,
}

impl Filter {
    pub fn new(default: LevelFilter) -> Self {
        Self {
            default,
            targets: Vec::new(),
        }
    }

    /// Parses a comma separated list of `level` and `target=level` directives. Unknown levels
    /// fall back to `info`, empty directives are ignored.
    pub fn parse(s: &str) -> Self {
        let mut filter = Self::default();

        for directive in s.split(',').map(str::trim).filter(|d| !d.is_empty()) {
            match directive.split_once('=') {
                Some((target, level)) => {
                    filter = filter.target(target.trim(), parse_level(level.trim()));
                }
                None => filter.default = parse_level(directive),
            }
        }

        filter
    }

    /// Sets the level for all targets starting with `target`.
    pub fn target(mut self, target: &str, level: LevelFilter) -> Self {
        self.targets.retain(|(t, _)| t != target);
        self.targets.push((target.to_owned(), level));
        self.targets.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()));
        self
    }

    pub fn enabled(&self, target: &str, level: Level) -> bool {
        let max = self
            .targets
            .iter()
            .find(|(prefix, _)| matches_target(target, prefix))
            .map(|(_, level)| *level)
            .unwrap_or(self.default);

        level <= max
    }
}

/// Returns `true` if `target` is the module `prefix` or one of its submodules.
fn matches_target(target: &str, prefix: &str) -> bool {
    match target.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with("::"),
        None => false,
    }
}

impl Default for Filter {
    fn default() -> Self {
        Self::new(LevelFilter::INFO)
    }
}

fn parse_level(s: &str) -> LevelFilter {
    match s {
        "error" | "ERROR" => LevelFilter::ERROR,
        "warn" | "WARN" => LevelFilter::WARN,
        "info" | "INFO" => LevelFilter::INFO,
        "debug" | "DEBUG" => LevelFilter::DEBUG,
        "trace" | "TRACE" => LevelFilter::TRACE,
        "off" | "OFF" => LevelFilter::OFF,
        _ => LevelFilter::INFO,
    }
}

struct Visitor {
    buf: String,
}

impl Visitor {
    fn new() -> Self {
        Self {
            buf: String::with_capacity(32),
        }
    }
}

impl Visit for Visitor {
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if !self.buf.is_empty() {
            self.buf.push(' ');
        }

        let _ = match field.name() {
            "message" => write!(self.buf, "{:?}", value),
            _ => write!(self.buf, "{} = {:?}", field, value),
        };
    }
}

impl Display for Visitor {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.buf, f)
    }
}

/// ANSI `[style, color]` pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct Color([u8; 2]);

impl Color {
    // Bold
    const RED: Self = Self([1, 31]);
    const YELLOW: Self = Self([1, 33]);
    const GREEN: Self = Self([1, 32]);
    const LIGHT_GRAY_BOLD: Self = Self([1, 37]);

    const LIGHT_GRAY: Self = Self([2, 37]);
}

struct ColorText<T>
where
    T: Display,
{
    text: T,
    color: Color,
}

impl<T> ColorText<T>
where
    T: Display,
{
    fn new(text: T, color: Color) -> Self {
        Self { text, color }
    }
}

impl<T> Display for ColorText<T>
where
    T: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\x1b[{};{}m{}\x1b[0m",
            self.color.0[0], self.color.0[1], self.text
        )
    }
}

#[cfg(test)]
mod tests {
    use tracing::metadata::LevelFilter;
    use tracing::Level;

    use super::{parse_level, Filter};

    #[test]
    fn parse_level_known() {
        assert_eq!(parse_level("debug"), LevelFilter::DEBUG);
        assert_eq!(parse_level("WARN"), LevelFilter::WARN);
        assert_eq!(parse_level("off"), LevelFilter::OFF);
    }

    #[test]
    fn parse_level_unknown_is_info() {
        assert_eq!(parse_level("verbose"), LevelFilter::INFO);
    }

    #[test]
    fn filter_default_level() {
        let filter = Filter::parse("warn");

        assert!(filter.enabled("game_touch_controls", Level::ERROR));
        assert!(filter.enabled("game_touch_controls", Level::WARN));
        assert!(!filter.enabled("game_touch_controls", Level::INFO));
    }

    #[test]
    fn filter_longest_target_wins() {
        let filter =
            Filter::parse("error, game_touch_controls=debug, game_touch_controls::render=off");

        assert!(filter.enabled("game_touch_controls::controls", Level::DEBUG));
        assert!(!filter.enabled("game_touch_controls::controls", Level::TRACE));
        assert!(!filter.enabled("game_touch_controls::render", Level::ERROR));
        assert!(!filter.enabled("game_input", Level::WARN));
    }

    #[test]
    fn filter_empty_is_info() {
        assert_eq!(Filter::parse(""), Filter::default());
        assert_eq!(Filter::parse(",,"), Filter::new(LevelFilter::INFO));
    }

    #[test]
    fn filter_target_stops_at_module_boundary() {
        let filter = Filter::parse("info,game_input=off");

        assert!(!filter.enabled("game_input", Level::ERROR));
        assert!(!filter.enabled("game_input::keyboard", Level::ERROR));
        assert!(filter.enabled("game_input_ext", Level::INFO));
        assert!(filter.enabled("game_input_ext::touch", Level::INFO));
    }
}
