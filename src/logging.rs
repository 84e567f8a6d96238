use std::io::Write;

use env_logger::{fmt::Color, Builder, Env};
use log::Level;

/// Status marker and its color for each log level.
pub fn marker(level: Level) -> (char, Color) {
    match level {
        Level::Info => ('+', Color::Green),
        Level::Error => ('-', Color::Red),
        Level::Warn => ('*', Color::Yellow),
        Level::Debug => (':', Color::Cyan),
        Level::Trace => (' ', Color::White),
    }
}

/// Installs the global logger. `RUST_LOG` overrides the `info` default.
///
/// Lines look like `[+] [2024-05-01T10:12:03Z] message`.
pub fn init() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let (symbol, color) = marker(record.level());
            let time = format!("[{}]", buf.timestamp_seconds());

            let mut status = buf.style();
            status.set_color(color.clone());
            let mut stamp = buf.style();
            stamp.set_color(Color::Blue);
            let mut message = buf.style();
            message.set_color(color).set_bold(true);

            writeln!(
                buf,
                "{} {} {}",
                status.value(format!("[{symbol}]")),
                stamp.value(time),
                message.value(record.args())
            )
        })
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_and_message_share_color() {
        let (_, color) = marker(Level::Error);
        assert_eq!(color.clone(), Color::Red);
        assert_eq!(color, Color::Red);
        assert_eq!(marker(Level::Info).1, Color::Green);
        assert_eq!(marker(Level::Warn).1, Color::Yellow);
    }

    #[test]
    fn markers_match_severity() {
        assert_eq!(marker(Level::Info).0, '+');
        assert_eq!(marker(Level::Error).0, '-');
        assert_eq!(marker(Level::Warn).0, '*');
        assert_eq!(marker(Level::Debug).0, ':');
        assert_eq!(marker(Level::Trace).0, ' ');
    }
}
