//! Output writer for generated source text.
//!
//! Builds the whole generated file in memory; nothing reaches disk unless
//! the full generation pass succeeds.

use std::fmt::Write as _;

/// Indentation unit for emitted code (4 spaces, rustfmt-compatible).
const INDENT: &str = "    ";

/// Line-oriented string builder with indentation tracking.
#[derive(Default)]
pub struct SourceWriter {
    buffer: String,
    depth: usize,
}

impl SourceWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit one line at the current indentation.
    pub fn line(&mut self, text: &str) {
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.buffer.push_str(INDENT);
            }
            self.buffer.push_str(text);
        }
        self.buffer.push('\n');
    }

    /// Emit a blank separator line.
    pub fn blank(&mut self) {
        self.buffer.push('\n');
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Finish, guaranteeing the output ends with exactly one newline.
    pub fn finish(mut self) -> String {
        while self.buffer.ends_with("\n\n") {
            self.buffer.pop();
        }
        if !self.buffer.ends_with('\n') {
            self.buffer.push('\n');
        }
        self.buffer
    }
}

/// Emitted enum variant for a type definition name.
///
/// Database names are lowercase identifiers (`float`, `image2d_t`); the
/// variant capitalizes each underscore-separated segment.
pub(crate) fn type_tag_ident(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for segment in name.split('_') {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.extend(chars);
        }
    }
    out
}

/// A `&str` literal with the given contents.
pub(crate) fn str_lit(text: &str) -> String {
    format!("\"{}\"", text.escape_default())
}

/// A byte-string literal (`b"..."`) with the given contents.
pub(crate) fn byte_str_lit(bytes: &[u8]) -> String {
    let mut out = String::from("b\"");
    for &b in bytes {
        let _ = write!(out, "{}", std::ascii::escape_default(b));
    }
    out.push('"');
    out
}

/// A byte literal (`b'c'`) for a single byte.
pub(crate) fn byte_lit(b: u8) -> String {
    format!("b'{}'", std::ascii::escape_default(b))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{byte_lit, byte_str_lit, str_lit, type_tag_ident, SourceWriter};

    #[test]
    fn lines_follow_indentation_depth() {
        let mut w = SourceWriter::new();
        w.line("fn lookup() {");
        w.indent();
        w.line("body();");
        w.dedent();
        w.line("}");
        assert_eq!(w.finish(), "fn lookup() {\n    body();\n}\n");
    }

    #[test]
    fn blank_lines_carry_no_indentation() {
        let mut w = SourceWriter::new();
        w.indent();
        w.line("a");
        w.blank();
        w.line("b");
        assert_eq!(w.finish(), "    a\n\n    b\n");
    }

    #[test]
    fn finish_normalizes_trailing_newlines() {
        let mut w = SourceWriter::new();
        w.line("end");
        w.blank();
        w.blank();
        assert_eq!(w.finish(), "end\n");
    }

    #[test]
    fn tag_idents_capitalize_segments() {
        assert_eq!(type_tag_ident("float"), "Float");
        assert_eq!(type_tag_ident("uchar16"), "Uchar16");
        assert_eq!(type_tag_ident("image2d_t"), "Image2dT");
    }

    #[test]
    fn literals_escape_contents() {
        assert_eq!(str_lit("cl_khr_fp64"), "\"cl_khr_fp64\"");
        assert_eq!(str_lit("a\"b"), "\"a\\\"b\"");
        assert_eq!(byte_str_lit(b"cos"), "b\"cos\"");
        assert_eq!(byte_lit(b'c'), "b'c'");
        assert_eq!(byte_lit(b'\''), "b'\\''");
    }
}
