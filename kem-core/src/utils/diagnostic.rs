use std::path::PathBuf;
pub use codespan_reporting::diagnostic::{LabelStyle, Severity};
use codespan_reporting::{diagnostic::Label as CodespanLabel, files::SimpleFiles};
use termcolor::Buffer;
use super::src_span::SrcSpan;

pub enum Level {
    Warning,
    Error,
}

pub struct Label {
    pub text: Option<String>,
    pub span: SrcSpan
}

impl Label {
    pub fn to_codespan_label(&self, file_id: usize, label_style: Option<LabelStyle>) -> CodespanLabel<usize> {
        let label = CodespanLabel::new(
            label_style.unwrap_or(LabelStyle::Primary),
            file_id,
            (self.span.start as usize)..(self.span.end as usize),
        );

        match &self.text {
            None => label,
            Some(text) => label.with_message(text.clone()),
        }
    }
}

pub struct Location<'a> {
    pub src: &'a str,
    pub path: PathBuf,
    pub label: Label,
    pub extra_labels: Vec<Label>,
}

pub struct Diagnostic<'a> {
    pub title: String,
    pub text: String,
    pub level: Level,
    pub location: Option<Location<'a>>
}

impl<'a> Diagnostic<'a> {
    pub fn write(&self, buf: &mut Buffer) -> std::io::Result<()> {
        use std::io::Write;

        match &self.location {
            Some(location) => self.write_span(location, buf)?,
            None => self.write_title(buf)?,
        }

        if !self.text.is_empty() {
            writeln!(buf, "{}", self.text)?;
        }

        Ok(())
    }

    pub fn write_span(&self, location: &Location, buf: &mut Buffer) -> std::io::Result<()> {
        let mut files = SimpleFiles::new();

        let location_path = location.path.to_string_lossy().into_owned();
        let file_id = files.add(location_path, location.src);

        let mut labels = vec![location.label.to_codespan_label(file_id, None)];

        location.extra_labels.iter()
            .for_each(|label| {
                labels.push(label.to_codespan_label(file_id, Some(LabelStyle::Secondary)))
            });

        let severity = match self.level {
            Level::Error => Severity::Error,
            Level::Warning => Severity::Warning,
        };

        let diagnostic = codespan_reporting::diagnostic::Diagnostic::new(severity)
            .with_message(&self.title)
            .with_labels(labels);

        let config = codespan_reporting::term::Config::default();

        codespan_reporting::term::emit(buf, &config, &files, &diagnostic)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err.to_string()))
    }

    pub fn write_title(&self, buf: &mut Buffer) -> std::io::Result<()> {
        use std::io::Write;
        use termcolor::{Color, ColorSpec, WriteColor};

        let (kind, colour) = match self.level {
            Level::Error => ("error", Color::Red),
            Level::Warning => ("warning", Color::Yellow),
        };

        buf.set_color(ColorSpec::new().set_bold(true).set_fg(Some(colour)))?;
        write!(buf, "{kind}")?;

        buf.set_color(ColorSpec::new().set_bold(true))?;
        write!(buf, ": {}\n\n", self.title)?;

        buf.set_color(&ColorSpec::new())
    }
}

/// Plain-text rendering with the offending line and a caret under `col`:
///
/// ```text
/// ParseError: Expected 'che' after variable name
///  --> line 2:6
/// 2 | aa x 5
///          ^
/// ```
///
/// A line outside the source collapses to a single line.
pub fn render_diagnostic(source: &str, line: u32, col: u32, message: &str, kind: &str) -> String {
    let lines = source.split('\n').collect::<Vec<_>>();

    if line < 1 || line as usize > lines.len() {
        return format!("{kind}: {message} (line {line}:{col})");
    }

    let error_line = lines[line as usize - 1];
    let width = line.to_string().len();
    let caret = " ".repeat(width + 3 + col.saturating_sub(1) as usize);

    format!(
        "{kind}: {message}\n --> line {line}:{col}\n{line:>width$} | {error_line}\n{caret}^"
    )
}
