//! Message template resolution
//!
//! Messages carry `{key}` placeholders that are resolved against the entry's
//! context only when the entry is read, never when it is logged. Values are
//! coerced to text by [`resolve_value`] and can optionally be wrapped in HTML
//! highlight markers by [`highlight`].
//!
//! Resolution never fails: a placeholder with no matching field stays in the
//! output verbatim.

use super::log_context::{ContextValue, LogContext};

/// Options controlling how a template is resolved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Wrap substituted values in HTML highlight markers
    pub highlight: bool,
    /// Resolve placeholders that do not name a top-level field by trimming
    /// them and walking dotted paths into nested maps
    pub promote_brackets: bool,
}

impl ResolveOptions {
    /// Plain substitution, the form used by `Display`
    pub const PLAIN: ResolveOptions = ResolveOptions {
        highlight: false,
        promote_brackets: false,
    };

    /// Highlighted substitution for HTML output
    pub const HIGHLIGHT: ResolveOptions = ResolveOptions {
        highlight: true,
        promote_brackets: false,
    };

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_highlight(mut self, highlight: bool) -> Self {
        self.highlight = highlight;
        self
    }

    #[must_use]
    pub fn with_promote_brackets(mut self, promote: bool) -> Self {
        self.promote_brackets = promote;
        self
    }
}

/// Resolve `{key}` placeholders in `template` against `context`
///
/// The template is scanned once; substituted text is never rescanned, so a
/// value containing braces cannot trigger further substitution. Placeholders
/// naming a context key exactly always win over the promotion pass. With
/// `highlight` set the whole result is HTML: literal text and unresolved
/// placeholders are escaped along with the values.
///
/// # Examples
///
/// ```
/// use diagnostics_logger::{resolve_template, LogContext, ResolveOptions};
///
/// let ctx = LogContext::new().with_field("name", "World");
/// assert_eq!(
///     resolve_template("Hello {name}", &ctx, ResolveOptions::PLAIN),
///     "Hello World"
/// );
/// assert_eq!(
///     resolve_template("Hello {missing}", &ctx, ResolveOptions::PLAIN),
///     "Hello {missing}"
/// );
/// ```
pub fn resolve_template(template: &str, context: &LogContext, options: ResolveOptions) -> String {
    let push_literal = |out: &mut String, text: &str| {
        if options.highlight {
            out.push_str(&escape_html(text));
        } else {
            out.push_str(text);
        }
    };

    if !template.contains('{') || !template.contains('}') || context.is_empty() {
        let mut out = String::with_capacity(template.len());
        push_literal(&mut out, template);
        return out;
    }

    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find('}') else {
            break;
        };

        // Innermost tag only: a later '{' before the closing brace restarts the scan there.
        if let Some(nested) = after_open[..close].rfind('{') {
            let skip = open + 1 + nested;
            push_literal(&mut out, &rest[..skip]);
            rest = &rest[skip..];
            continue;
        }

        let key = &after_open[..close];
        push_literal(&mut out, &rest[..open]);

        match lookup(key, context, options.promote_brackets) {
            Some(value) => {
                let text = resolve_value(value);
                if options.highlight {
                    out.push_str(&highlight(&text));
                } else {
                    out.push_str(&text);
                }
            }
            None => push_literal(&mut out, &rest[open..open + close + 2]),
        }

        rest = &after_open[close + 1..];
    }

    push_literal(&mut out, rest);
    out
}

fn lookup<'a>(key: &str, context: &'a LogContext, promote: bool) -> Option<&'a ContextValue> {
    if let Some(value) = context.get(key) {
        return Some(value);
    }
    if !promote {
        return None;
    }

    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    if let Some(value) = context.get(key) {
        return Some(value);
    }

    let mut segments = key.split('.');
    let mut current = context.get(segments.next()?)?;
    for segment in segments {
        current = current.as_map()?.get(segment)?;
    }
    Some(current)
}

/// Coerce a context value to display text
///
/// Rules, first match wins:
/// 1. booleans become `true` / `false`
/// 2. null, strings, numbers and self-printing objects use their string form
/// 3. date-times use RFC 3339
/// 4. opaque objects become `[object <Type>]`
/// 5. anything else becomes `[<type>]`
pub fn resolve_value(value: &ContextValue) -> String {
    match value {
        ContextValue::Bool(b) => b.to_string(),
        ContextValue::Null => "null".to_string(),
        ContextValue::String(s) => s.clone(),
        ContextValue::Int(i) => i.to_string(),
        ContextValue::Float(f) => f.to_string(),
        ContextValue::Stringable { display, .. } => display.clone(),
        ContextValue::Exception(exception) => exception.to_string(),
        ContextValue::DateTime(dt) => dt.to_rfc3339(),
        ContextValue::Object { type_name } => format!("[object {}]", type_name),
        ContextValue::List(_) | ContextValue::Map(_) => format!("[{}]", value.type_name()),
    }
}

/// Values shorter than this get the compact highlight marker
const COMPACT_HIGHLIGHT_LEN: usize = 12;

/// Wrap a resolved value in an HTML highlight marker
///
/// `true`, `false` and `null` get success, danger and warning markers; short or
/// numeric values get a compact `<b>` marker and everything else a `<span>`.
/// The value is HTML-escaped, and any `::` separator is wrapped on its own.
pub fn highlight(value: &str) -> String {
    let mut text = escape_html(value);
    if text.contains("::") {
        text = text.replace("::", r#"<span class="highlight-separator">::</span>"#);
    }

    match value.to_ascii_lowercase().as_str() {
        "true" => return format!(r#"<b class="highlight-success">{}</b>"#, text),
        "false" => return format!(r#"<b class="highlight-danger">{}</b>"#, text),
        "null" => return format!(r#"<b class="highlight-warning">{}</b>"#, text),
        _ => {}
    }

    if value.chars().count() < COMPACT_HIGHLIGHT_LEN || is_numeric(value) {
        format!(r#"<b class="highlight">{}</b>"#, text)
    } else {
        format!(r#"<span class="highlight">{}</span>"#, text)
    }
}

fn is_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed.parse::<f64>().is_ok_and(f64::is_finite)
}

/// Escape the HTML special characters in `text`
pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
