use std::borrow::Cow;

use parking_lot::RwLock;

static CURRENT: RwLock<Format> = parking_lot::const_rwlock(Format::DEFAULT);

/// Indentation unit and line terminator, plus the stateless helpers every
/// transform uses to lay out text.
///
/// A process-wide default exists ([`Format::current`]); each generator takes
/// a copy when it is built so a later swap never affects a running session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    indent: Cow<'static, str>,
    line_terminator: Cow<'static, str>,
}

impl Format {
    pub const DEFAULT: Format = Format {
        indent: Cow::Borrowed("    "),
        line_terminator: Cow::Borrowed("\n"),
    };

    pub fn new(
        indent: impl Into<Cow<'static, str>>,
        line_terminator: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            indent: indent.into(),
            line_terminator: line_terminator.into(),
        }
    }

    /// `width` spaces per level.
    pub fn spaces(width: usize) -> Self {
        Self::new(" ".repeat(width), "\n")
    }

    pub fn with_line_terminator(mut self, line_terminator: impl Into<Cow<'static, str>>) -> Self {
        self.line_terminator = line_terminator.into();
        self
    }

    /// The process-wide default.
    pub fn current() -> Format {
        CURRENT.read().clone()
    }

    /// Swaps the process-wide default, returning the previous one.
    pub fn set_current(format: Format) -> Format {
        std::mem::replace(&mut *CURRENT.write(), format)
    }

    pub fn indent_unit(&self) -> &str {
        &self.indent
    }

    pub fn nl(&self) -> &str {
        &self.line_terminator
    }

    /// Indents every non-empty line one level.
    pub fn indent(&self, text: &str) -> String {
        text.split(self.nl())
            .map(|line| {
                if line.is_empty() {
                    String::new()
                } else {
                    format!("{}{}", self.indent, line)
                }
            })
            .collect::<Vec<_>>()
            .join(self.nl())
    }

    /// Wraps `body` in braces one level deeper. An empty body gives `{}`.
    pub fn block(&self, body: &str) -> String {
        if body.is_empty() {
            return "{}".to_string();
        }
        format!("{{{nl}{}{nl}}}", self.indent(body), nl = self.nl())
    }

    /// Joins the non-empty items with `separator`. Nothing in, nothing out.
    pub fn join<I>(&self, items: I, separator: &str) -> String
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut output = String::new();
        for item in items {
            let item = item.as_ref();
            if item.is_empty() {
                continue;
            }
            if !output.is_empty() {
                output.push_str(separator);
            }
            output.push_str(item);
        }
        output
    }

    /// One item per line.
    pub fn lines<I>(&self, items: I) -> String
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.join(items, self.nl())
    }

    /// Member groups with a blank line only between two non-empty groups.
    pub fn separate<I>(&self, groups: I) -> String
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let separator = format!("{nl}{nl}", nl = self.nl());
        self.join(groups, &separator)
    }

    /// Verbatim statements, blank lines kept.
    pub fn code(&self, code: &[String]) -> String {
        code.iter()
            .flat_map(|statement| statement.split('\n'))
            .collect::<Vec<_>>()
            .join(self.nl())
    }
}

impl Default for Format {
    fn default() -> Self {
        Self::DEFAULT
    }
}
