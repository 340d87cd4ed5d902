//! Rendering of trace lines.
//!
//! ```text
//! [<id>] <indent><prefix><message>[ time=<ms>ms][ ex=<error>]
//! ```

use std::fmt;
use std::time::Duration;

use crate::config::TraceGlyphs;

use super::id::TraceId;

/// Type name and display text of an error recorded by `exception`.
///
/// The type name is the *static* type the error was passed as, with smart
/// pointers and references unwrapped: `Box<NotFound>` reports `NotFound`.
/// Trait objects and type-erased errors (`Box<dyn Error>`, `anyhow::Error`)
/// carry no concrete type, so they report the trait or wrapper name
/// (`Error`).
///
/// # Example
///
/// ```rust
/// use calltrace::ErrorDescription;
///
/// let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
/// let description = ErrorDescription::of(&io);
/// assert_eq!(description.kind(), "Error");
/// assert_eq!(description.to_string(), "Error: disk gone");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDescription {
    kind: String,
    message: String,
}

impl ErrorDescription {
    /// Describes `error` by its static type name and display text.
    pub fn of<E: fmt::Display + ?Sized>(error: &E) -> Self {
        Self {
            kind: short_type_name(std::any::type_name::<E>()).to_string(),
            message: error.to_string(),
        }
    }

    /// Short type name, e.g. `NotFound`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Display text of the error.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ErrorDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            f.write_str(&self.kind)
        } else {
            write!(f, "{}: {}", self.kind, self.message)
        }
    }
}

/// Pointer types whose type parameter names the error better than they do.
const TRANSPARENT_WRAPPERS: [&str; 5] = [
    "alloc::boxed::Box<",
    "alloc::sync::Arc<",
    "alloc::rc::Rc<",
    "&mut ",
    "&",
];

/// Last path segment of a type name, without wrappers, generics or trait-object bounds.
fn short_type_name(full: &str) -> &str {
    let mut name = full;
    while let Some(inner) = TRANSPARENT_WRAPPERS
        .iter()
        .find_map(|wrapper| name.strip_prefix(wrapper))
    {
        name = inner;
    }
    let name = name.strip_prefix("dyn ").unwrap_or(name);
    let name = name
        .split(|c: char| matches!(c, '<' | '>' | ',' | ' '))
        .next()
        .unwrap_or(name);
    name.rsplit("::").next().unwrap_or(name)
}

/// Indentation plus prefix for a line at `level`.
///
/// Level 0 is the bare prefix; level 1 is `branch + prefix`; every further
/// level adds one `indent` in front.
pub(crate) fn add_space(glyphs: &TraceGlyphs, prefix: &str, level: u32) -> String {
    let mut out = String::with_capacity(glyphs.indent.len() * level as usize + prefix.len());
    for i in 0..level {
        if i + 1 == level {
            out.push_str(&glyphs.branch);
        } else {
            out.push_str(&glyphs.indent);
        }
    }
    out.push_str(prefix);
    out
}

pub(crate) fn begin_line(glyphs: &TraceGlyphs, trace_id: &TraceId, message: &str) -> String {
    format!(
        "[{}] {}{}",
        trace_id.id(),
        add_space(glyphs, &glyphs.start, trace_id.level()),
        message
    )
}

pub(crate) fn end_line(
    glyphs: &TraceGlyphs,
    trace_id: &TraceId,
    message: &str,
    elapsed: Duration,
) -> String {
    format!(
        "[{}] {}{} time={}ms",
        trace_id.id(),
        add_space(glyphs, &glyphs.complete, trace_id.level()),
        message,
        elapsed.as_millis()
    )
}

pub(crate) fn exception_line(
    glyphs: &TraceGlyphs,
    trace_id: &TraceId,
    message: &str,
    elapsed: Duration,
    error: &ErrorDescription,
) -> String {
    format!(
        "[{}] {}{} time={}ms ex={}",
        trace_id.id(),
        add_space(glyphs, &glyphs.exception, trace_id.level()),
        message,
        elapsed.as_millis(),
        error
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct NoSuchField;

    impl fmt::Display for NoSuchField {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            Ok(())
        }
    }

    impl std::error::Error for NoSuchField {}

    #[test]
    fn test_add_space_per_level() {
        let glyphs = TraceGlyphs::default();
        assert_eq!(add_space(&glyphs, "-->", 0), "-->");
        assert_eq!(add_space(&glyphs, "-->", 1), "|-->");
        assert_eq!(add_space(&glyphs, "-->", 2), "|   |-->");
        assert_eq!(add_space(&glyphs, "<X-", 3), "|   |   |<X-");
    }

    #[test]
    fn test_lines_share_chain_id_and_indent() {
        let glyphs = TraceGlyphs::default();
        let id = TraceId::with_level("3f2a9c1b", 1).unwrap();

        assert_eq!(begin_line(&glyphs, &id, "hello2"), "[3f2a9c1b] |-->hello2");
        assert_eq!(
            end_line(&glyphs, &id, "hello2", Duration::from_millis(12)),
            "[3f2a9c1b] |<--hello2 time=12ms"
        );
    }

    #[test]
    fn test_exception_line_names_error() {
        let glyphs = TraceGlyphs::default();
        let id = TraceId::with_level("3f2a9c1b", 0).unwrap();
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");

        assert_eq!(
            exception_line(
                &glyphs,
                &id,
                "hello",
                Duration::ZERO,
                &ErrorDescription::of(&io)
            ),
            "[3f2a9c1b] <X-hello time=0ms ex=Error: disk gone"
        );
        assert_eq!(
            ErrorDescription::of(&NoSuchField).to_string(),
            "NoSuchField"
        );
    }

    #[test]
    fn test_wrapped_errors_report_inner_type() {
        let boxed = Box::new(NoSuchField);
        assert_eq!(ErrorDescription::of(&boxed).kind(), "NoSuchField");

        let shared = std::sync::Arc::new(NoSuchField);
        assert_eq!(ErrorDescription::of(&shared).kind(), "NoSuchField");

        let erased: Box<dyn std::error::Error + Send + Sync> = "plain".into();
        let description = ErrorDescription::of(&erased);
        assert_eq!(description.kind(), "Error");
        assert_eq!(description.message(), "plain");
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("std::io::error::Error"), "Error");
        assert_eq!(short_type_name("alloc::string::String"), "String");
        assert_eq!(short_type_name("core::option::Option<u8>"), "Option");
        assert_eq!(
            short_type_name("dyn core::error::Error + core::marker::Send"),
            "Error"
        );
        assert_eq!(short_type_name("str"), "str");
        assert_eq!(short_type_name("&str"), "str");
        assert_eq!(
            short_type_name("alloc::boxed::Box<my_crate::NotFound, alloc::alloc::Global>"),
            "NotFound"
        );
        assert_eq!(
            short_type_name("alloc::boxed::Box<dyn core::error::Error + core::marker::Send>"),
            "Error"
        );
    }
}
