//! Line-oriented document model
//!
//! A [`Document`] holds the lines of a text file without their terminators,
//! plus the line-ending convention and whether the file ended with one.
//! [`Document::render`] joins them back; with no edits a file that used a
//! single convention comes back byte-identical.

use std::fmt;

/// Line terminator convention of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
    Cr,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
            LineEnding::Cr => "\r",
        }
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LineEnding::Lf => "LF",
            LineEnding::CrLf => "CRLF",
            LineEnding::Cr => "CR",
        };
        f.write_str(name)
    }
}

/// A text file split into lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
    line_ending: LineEnding,
    trailing_newline: bool,
}

impl Document {
    /// Split `source` on `\r\n`, `\n` and lone `\r`.
    ///
    /// Any CRLF makes the document CRLF. Otherwise the more frequent of LF
    /// and CR wins, ties and terminator-free input going to LF.
    pub fn parse(source: &str) -> Self {
        let mut lines = Vec::new();
        let (mut lf, mut crlf, mut cr) = (0usize, 0usize, 0usize);
        let mut current = String::new();
        let mut chars = source.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '\r' if chars.peek() == Some(&'\n') => {
                    chars.next();
                    crlf += 1;
                    lines.push(std::mem::take(&mut current));
                }
                '\r' => {
                    cr += 1;
                    lines.push(std::mem::take(&mut current));
                }
                '\n' => {
                    lf += 1;
                    lines.push(std::mem::take(&mut current));
                }
                other => current.push(other),
            }
        }

        let trailing_newline = source.ends_with('\n') || source.ends_with('\r');
        if !trailing_newline {
            lines.push(current);
        }
        if source.is_empty() {
            lines.clear();
        }

        let line_ending = if crlf > 0 {
            LineEnding::CrLf
        } else if cr > lf {
            LineEnding::Cr
        } else {
            LineEnding::Lf
        };

        Self {
            lines,
            line_ending,
            trailing_newline,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub fn has_trailing_newline(&self) -> bool {
        self.trailing_newline
    }

    /// Same conventions, new content.
    pub fn with_lines(&self, lines: Vec<String>) -> Self {
        Self {
            lines,
            line_ending: self.line_ending,
            trailing_newline: self.trailing_newline,
        }
    }

    /// Join the lines back into text.
    pub fn render(&self) -> String {
        let mut out = self.lines.join(self.line_ending.as_str());
        if self.trailing_newline && !self.lines.is_empty() {
            out.push_str(self.line_ending.as_str());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("a\nb\n", LineEnding::Lf, true)]
    #[case("a\r\nb\r\n", LineEnding::CrLf, true)]
    #[case("a\rb\r", LineEnding::Cr, true)]
    #[case("a\nb", LineEnding::Lf, false)]
    #[case("single line", LineEnding::Lf, false)]
    #[case("a\nb\r\nc\n", LineEnding::CrLf, true)]
    #[case("a\rb\rc\n", LineEnding::Cr, true)]
    #[case("a\rb\nc", LineEnding::Lf, false)]
    fn detects_conventions(#[case] source: &str, #[case] ending: LineEnding, #[case] trailing: bool) {
        let doc = Document::parse(source);
        assert_eq!(doc.line_ending(), ending);
        assert_eq!(doc.has_trailing_newline(), trailing);
    }

    #[rstest]
    #[case("a\nb\n")]
    #[case("a\r\nb\r\n")]
    #[case("a\rb")]
    #[case("\n\n")]
    #[case("x")]
    #[case("")]
    fn renders_uniform_input_unchanged(#[case] source: &str) {
        assert_eq!(Document::parse(source).render(), source);
    }

    #[test]
    fn splits_on_every_terminator() {
        let doc = Document::parse("one\r\ntwo\nthree\rfour");
        assert_eq!(doc.lines(), ["one", "two", "three", "four"]);
    }

    #[test]
    fn blank_lines_are_kept() {
        let doc = Document::parse("a\n\nb\n");
        assert_eq!(doc.lines(), ["a", "", "b"]);
    }

    #[test]
    fn with_lines_keeps_conventions() {
        let doc = Document::parse("a\r\nb");
        let edited = doc.with_lines(vec!["a".into(), "x".into(), "b".into()]);
        assert_eq!(edited.render(), "a\r\nx\r\nb");
    }
}
