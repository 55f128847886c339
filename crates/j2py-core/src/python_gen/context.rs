//! Per-invocation translation state.

use indexmap::IndexMap;
use std::collections::HashSet;

const INDENT: &str = "    ";

/// Mutable state threaded through one `translate` call: lexical indent
/// level, the declaring class's field table, the current method's
/// local/parameter names and the output buffer.
///
/// A fresh context is built for every invocation and discarded with it;
/// nothing is shared across sequential or concurrent translations.
#[derive(Debug, Default)]
pub struct CodeGenContext {
    indent: usize,
    /// Field name -> mapped Python type label, in declaration order. Valid
    /// only while the declaring class's body is being translated.
    pub field_table: IndexMap<String, String>,
    /// Locals and parameters of the method currently being translated;
    /// shadows the field table when a bare identifier is resolved.
    pub local_vars: HashSet<String>,
    out: String,
}

impl CodeGenContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line at the current indent.
    pub fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// Separator between declarations.
    pub fn blank_line(&mut self) {
        self.out.push('\n');
    }

    /// Run `f` one level deeper. The push and pop are symmetric on every
    /// path, so no emitter can leak an unbalanced indent change.
    pub fn with_indent<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.indent += 1;
        f(self);
        self.indent -= 1;
    }

    /// Bytes emitted so far; callers compare snapshots to detect suites
    /// that produced no text.
    pub fn emitted(&self) -> usize {
        self.out.len()
    }

    pub fn indent_level(&self) -> usize {
        self.indent
    }

    pub fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_indented_four_spaces_per_level() {
        let mut ctx = CodeGenContext::new();
        ctx.line("a");
        ctx.with_indent(|ctx| {
            ctx.line("b");
            ctx.with_indent(|ctx| ctx.line("c"));
        });
        assert_eq!(ctx.finish(), "a\n    b\n        c\n");
    }

    #[test]
    fn with_indent_restores_the_level() {
        let mut ctx = CodeGenContext::new();
        ctx.with_indent(|ctx| {
            ctx.with_indent(|_| {});
            assert_eq!(ctx.indent_level(), 1);
        });
        assert_eq!(ctx.indent_level(), 0);
    }
}
