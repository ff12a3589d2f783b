//! Annotated source reports.

use std::io::{self, Write};
use std::ops::Range;

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use lambda_ir::Span;

use crate::Diagnostic;

/// Renders diagnostics against one source file.
#[derive(Clone, Copy, Debug)]
pub struct ReportRenderer<'a> {
    file_name: &'a str,
    source: &'a str,
    color: bool,
}

impl<'a> ReportRenderer<'a> {
    pub fn new(file_name: &'a str, source: &'a str) -> Self {
        ReportRenderer {
            file_name,
            source,
            color: false,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Write one report.
    pub fn write(&self, diagnostic: &Diagnostic, out: &mut impl Write) -> io::Result<()> {
        self.report(diagnostic)
            .write((self.file_name, Source::from(self.source.to_string())), out)
    }

    /// Render every diagnostic into one string.
    ///
    /// Falls back to the compact `Display` form if a report cannot be
    /// rendered.
    pub fn render(&self, diagnostics: &[Diagnostic]) -> String {
        let mut out = Vec::new();
        for diagnostic in diagnostics {
            if self.write(diagnostic, &mut out).is_err() {
                out.extend_from_slice(diagnostic.to_string().as_bytes());
                out.push(b'\n');
            }
        }
        String::from_utf8_lossy(&out).into_owned()
    }

    fn report(&self, diagnostic: &Diagnostic) -> Report<'a, (&'a str, Range<usize>)> {
        let offset = diagnostic
            .primary_span()
            .map_or(0, |span| self.char_offset(span.start));

        let mut builder = Report::build(ReportKind::Error, self.file_name, offset)
            .with_config(Config::default().with_color(self.color))
            .with_code(diagnostic.code)
            .with_message(&diagnostic.message);

        for label in &diagnostic.labels {
            let color = if label.is_primary {
                Color::Red
            } else {
                Color::Blue
            };
            builder = builder.with_label(
                Label::new((self.file_name, self.char_range(label.span)))
                    .with_message(&label.message)
                    .with_color(color),
            );
        }
        if !diagnostic.notes.is_empty() {
            builder = builder.with_note(diagnostic.notes.join("\n"));
        }
        if !diagnostic.suggestions.is_empty() {
            builder = builder.with_help(diagnostic.suggestions.join("\n"));
        }
        builder.finish()
    }

    /// Reports index by character, spans by byte.
    fn char_offset(&self, byte: u32) -> usize {
        let byte = (byte as usize).min(self.source.len());
        match self.source.get(..byte) {
            Some(prefix) => prefix.chars().count(),
            None => self.source.chars().count(),
        }
    }

    fn char_range(&self, span: Span) -> Range<usize> {
        self.char_offset(span.start)..self.char_offset(span.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCode;

    fn missing_value() -> Diagnostic {
        Diagnostic::error(ErrorCode::E1002)
            .with_message("missing expression")
            .with_label(Span::new(8, 9), "expected an expression before this")
            .with_note("`let` needs a value before `;`")
    }

    #[test]
    fn test_render_plain_report() {
        let source = "let x = ; y";
        let text = ReportRenderer::new("input.lambda", source).render(&[missing_value()]);
        assert!(text.contains("E1002"), "{text}");
        assert!(text.contains("missing expression"), "{text}");
        assert!(text.contains("expected an expression before this"), "{text}");
        assert!(text.contains("input.lambda"), "{text}");
        assert!(!text.contains('\u{1b}'), "plain output has no escapes: {text}");
    }

    #[test]
    fn test_render_multiple() {
        let source = "let x = ; y";
        let text = ReportRenderer::new("a", source).render(&[missing_value(), missing_value()]);
        assert_eq!(text.matches("E1002").count(), 2);
    }

    #[test]
    fn test_char_offsets_skip_multibyte() {
        let renderer = ReportRenderer::new("a", "é x");
        assert_eq!(renderer.char_offset(2), 1);
        assert_eq!(renderer.char_range(Span::new(3, 4)), 2..3);
        // past the end clamps
        assert_eq!(renderer.char_offset(99), 3);
    }
}
