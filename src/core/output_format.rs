//! Output format configuration for resolved entries
//!
//! Provides different output formats for drained entries:
//! - Text: one `Level: message` line per entry (default)
//! - Html: a `<pre class="log-dump">` grid with level and timing columns
//! - Json: machine-readable array of entries

use super::error::Result;
use super::logger::ResolvedEntry;
use super::template::escape_html;
use super::timestamp::FormatterConfig;
use chrono::Utc;

/// Stylesheet emitted ahead of HTML dumps
pub const STYLESHEET: &str = r#"pre.log-dump {
    --padding: 8px;
    display: grid;
    grid-template-columns: max-content max-content 1fr;
    padding: 0 var(--padding);
    column-gap: 1ch;
    color: #fefefe;
    background-color: #15191e80;
    font-family: monospace;
    font-size: 15px;
    line-height: 1.5;
    overflow: hidden;
}
pre.log-dump div.log-entry { display: contents; }
pre.log-dump div[class*="log-column-"] {
    white-space: normal;
    position: relative;
    padding-top: 5px;
    padding-bottom: 5px;
}
pre.log-dump .log-column-timer {
    user-select: none;
    position: relative;
    display: flex;
    justify-content: flex-end;
    overflow: hidden;
    padding-left: 1.125ch;
}
pre.log-dump .log-column-timer.has-offset:hover { cursor: progress; }
pre.log-dump .log-column-timer.has-offset > span {
    display: inline-block;
    transition: opacity 100ms ease-in-out, transform 150ms ease-in-out;
}
pre.log-dump .log-column-timer > span.log-precision-delta {
    position: relative;
    right: .5rem;
    color: #bfacac;
}
pre.log-dump .log-column-timer > span.log-precision-offset {
    position: absolute;
    right: .5rem;
    opacity: 0;
    transform: translateY(-100%);
    color: #a2b3ef;
}
pre.log-dump .log-column-timer.has-offset::before {
    content: "+";
    position: absolute;
    left: 0;
    color: lightgreen;
    opacity: .25;
}
pre.log-dump .log-column-timer.has-offset:hover::before { opacity: 1; }
pre.log-dump .log-column-timer.has-offset:hover > span.log-precision-delta {
    opacity: 0;
    transform: translateY(100%);
}
pre.log-dump .log-column-timer.has-offset:hover > span.log-precision-offset {
    opacity: 1;
    transform: translateY(0);
}
pre.log-dump .log-column-level { user-select: none; width: fit-content; }
pre.log-dump .highlight { display: inline-block; color: #52dfff; }
pre.log-dump .highlight-separator { color: #8a8a8a; }
pre.log-dump .highlight-success { color: #45d5bd; }
pre.log-dump .highlight-warning { color: #d69045; }
pre.log-dump .highlight-danger { color: #d55645; }
pre.log-dump .log-level.debug { color: #e6f2ff; }
pre.log-dump .log-level.info { color: #2fe02f; }
pre.log-dump .log-level.notice { color: #2fa5e0; }
pre.log-dump .log-level.warning { color: #e0992f; }
pre.log-dump .log-level.error { color: #e12f2f; }
pre.log-dump .log-level.critical { font-weight: bold; color: #ff0000; }
pre.log-dump .log-level.alert { color: white; background-color: #e12f2f; }
pre.log-dump .log-level.emergency { color: #ff0000; }
pre.log-dump .log-column-message { position: relative; }
pre.log-dump .log-column-message.emergency { background-color: black; }
"#;

/// Output format for resolved entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text lines (default)
    ///
    /// Example: `[08-01-2025 10:30:45 UTC] Info: Request processed`
    #[default]
    Text,

    /// HTML fragment with per-level CSS classes and a timing column
    Html,

    /// JSON array of entries
    ///
    /// Example: `[{"level":"Info","message":"Request processed","context":{}}]`
    Json,
}

impl OutputFormat {
    /// Render a batch of entries according to this output format
    pub fn render(&self, entries: &[ResolvedEntry], config: &FormatterConfig) -> Result<String> {
        match self {
            OutputFormat::Text => Ok(entries
                .iter()
                .map(|entry| Self::format_text_line(entry, config))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Html => Ok(Self::render_html(entries, config)),
            OutputFormat::Json => Ok(serde_json::to_string(entries)?),
        }
    }

    /// Format one entry as a text line
    pub fn format_text_line(entry: &ResolvedEntry, config: &FormatterConfig) -> String {
        let mut line = String::new();

        if let (Some(format), Some(timestamp)) = (&config.timestamp_format, &entry.timestamp) {
            line.push('[');
            line.push_str(&format.format(timestamp));
            line.push_str("] ");
        }

        if config.include_level {
            let level = if config.level_uppercase {
                entry.level.to_str()
            } else {
                entry.level.name()
            };
            line.push_str(level);
            line.push_str(": ");
        }

        line.push_str(&entry.message);
        line
    }

    /// Format one entry as an HTML grid row
    ///
    /// The message is inserted as is, so it should be resolved with
    /// highlighting, which escapes it. Timing values are escaped here.
    pub fn format_html_entry(entry: &ResolvedEntry, config: &FormatterConfig) -> String {
        let class = entry.level.as_lower();
        let label = if config.level_uppercase {
            entry.level.to_str()
        } else {
            class
        };

        let delta = entry
            .delta_ms()
            .map(|delta| format!(r#"<span class="log-precision-delta">{}</span>"#, escape_html(delta)))
            .unwrap_or_default();
        let offset = entry
            .offset_ms()
            .map(|offset| format!(r#"<span class="log-precision-offset">{}</span>"#, escape_html(offset)))
            .unwrap_or_default();
        let has_offset = if offset.is_empty() { "" } else { " has-offset" };

        format!(
            concat!(
                r#"<div class="log-entry">"#,
                r#"<div class="log-column-level"><span class="log-level {class}">{label}</span></div>"#,
                r#"<div class="log-column-timer{has_offset}">{delta}{offset}</div>"#,
                r#"<div class="log-column-message {class}"><span class="log-message">{message}</span></div>"#,
                "</div>"
            ),
            class = class,
            label = label,
            has_offset = has_offset,
            delta = delta,
            offset = offset,
            message = entry.message,
        )
    }

    /// Render a full HTML dump: stylesheet, then the `log-dump` grid
    pub fn render_html(entries: &[ResolvedEntry], config: &FormatterConfig) -> String {
        let rows = entries
            .iter()
            .map(|entry| Self::format_html_entry(entry, config))
            .collect::<Vec<_>>()
            .join("\n");

        let stylesheet = if config.include_stylesheet {
            format!("<style>{}</style>", STYLESHEET)
        } else {
            String::new()
        };

        format!(
            r#"{}<pre class="log-dump" data-timestamp="{}">{}</pre>"#,
            stylesheet,
            Utc::now().format("%Y-%m-%d %H:%M:%S"),
            rows
        )
    }
}
