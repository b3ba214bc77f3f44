use std::{
    io::{IsTerminal, Write},
    path::Path,
    time::Duration,
};
use kem_core::utils::prelude::Error;
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

pub(crate) fn print_running(path: &Path) {
    print_colourful_prefix("Running", Color::Green, &path.display().to_string())
}

pub(crate) fn print_finished(duration: Duration) {
    print_colourful_prefix("Finished", Color::Green, &format!("in {}", seconds(duration)))
}

pub(crate) fn print_formatted(path: &Path) {
    print_colourful_prefix("Formatted", Color::Green, &path.display().to_string())
}

pub(crate) fn print_unchanged(path: &Path) {
    print_colourful_prefix("Unchanged", Color::White, &path.display().to_string())
}

pub(crate) fn print_would_format(path: &Path) {
    print_colourful_prefix("Unformatted", Color::Yellow, &path.display().to_string())
}

pub(crate) fn print_warning(text: &str) {
    print_colourful_prefix("Warning", Color::Yellow, text)
}

pub(crate) fn print_failure(text: &str) {
    print_colourful_prefix("Failed", Color::Red, text)
}

pub fn seconds(duration: Duration) -> String {
    format!("{:.2}s", duration.as_millis() as f32 / 1000.)
}

pub fn print_colourful_prefix(prefix: &str, color: Color, text: &str) {
    let buffer_writer = stderr_buffer_writer();
    let mut buffer = buffer_writer.buffer();

    let written = (|| -> std::io::Result<()> {
        buffer.set_color(
            ColorSpec::new()
                .set_intense(true)
                .set_bold(true)
                .set_fg(Some(color)),
        )?;
        write!(buffer, "{prefix: >11}")?;
        buffer.set_color(&ColorSpec::new())?;
        writeln!(buffer, " {text}")
    })();

    if written.is_ok() {
        let _ = buffer_writer.print(&buffer);
    }
}

/// Writes a codespan-rendered diagnostic to stderr.
pub fn print_error(err: &Error) {
    let buffer_writer = stderr_buffer_writer();
    let mut buffer = buffer_writer.buffer();

    if err.pretty(&mut buffer).is_ok() {
        let _ = buffer_writer.print(&buffer);
    }
}

pub fn stderr_buffer_writer() -> BufferWriter {
    BufferWriter::stderr(color_choice())
}

fn colour_forced() -> bool {
    if let Ok(force) = std::env::var("FORCE_COLOR") {
        !force.is_empty()
    } else {
        false
    }
}

fn color_choice() -> ColorChoice {
    if colour_forced() {
        ColorChoice::Always
    } else if std::io::stderr().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}
