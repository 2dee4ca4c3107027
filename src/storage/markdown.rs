use crate::error::{BlogError, Result};
use crate::model::RawPost;
use chrono::{DateTime, Utc};

const FRONTMATTER_DELIMITER: &str = "+++";

/// Parse a stored post file.
///
/// The content after the frontmatter is kept verbatim apart from the single
/// blank separator line. A `created_at` that is missing, or that does not
/// decode as an RFC 3339 timestamp, is reported as `None`.
pub fn parse_post(content: &str) -> Result<RawPost> {
    let rest = content
        .strip_prefix(FRONTMATTER_DELIMITER)
        .and_then(|r| r.strip_prefix('\n').or_else(|| r.strip_prefix("\r\n")))
        .ok_or_else(|| BlogError::Parse("Missing TOML frontmatter delimiter".to_string()))?;

    let closing = format!("\n{}", FRONTMATTER_DELIMITER);
    let end_index = rest
        .find(&closing)
        .ok_or_else(|| BlogError::Parse("Missing closing frontmatter delimiter".to_string()))?;

    let toml_content = &rest[..end_index];
    let after = &rest[end_index + closing.len()..];
    let body = after
        .strip_prefix("\r\n")
        .or_else(|| after.strip_prefix('\n'))
        .unwrap_or(after);
    let body = body
        .strip_prefix("\r\n")
        .or_else(|| body.strip_prefix('\n'))
        .unwrap_or(body);

    let table: toml::Table = toml::from_str(toml_content)?;

    let text = |key: &str| {
        table
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    };

    Ok(RawPost {
        id: text("id"),
        title: text("title"),
        content: body.to_string(),
        created_at: table.get("created_at").and_then(decode_timestamp),
    })
}

fn decode_timestamp(value: &toml::Value) -> Option<DateTime<Utc>> {
    let raw = match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Datetime(dt) => dt.to_string(),
        _ => return None,
    };
    DateTime::parse_from_rfc3339(&raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// A TOML basic string on one line.
///
/// JSON string escapes are all valid in TOML. DEL is the one control
/// character TOML requires escaped that JSON leaves alone.
fn basic_string(value: &str) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace('\u{7f}', "\\u007F"))
}

/// Render a post file: TOML frontmatter, a blank line, then the content as is.
///
/// Every value is written on a single line, so nothing in a title can end
/// the frontmatter early.
pub fn render_post(
    id: &str,
    title: &str,
    content: &str,
    created_at: DateTime<Utc>,
) -> Result<String> {
    let created_at = created_at.to_rfc3339();

    let mut output = String::new();
    output.push_str(FRONTMATTER_DELIMITER);
    output.push('\n');
    for (key, value) in [("id", id), ("title", title), ("created_at", created_at.as_str())] {
        output.push_str(&format!("{} = {}\n", key, basic_string(value)?));
    }
    output.push_str(FRONTMATTER_DELIMITER);
    output.push_str("\n\n");
    output.push_str(content);

    Ok(output)
}
