use crate::error::{Error, Result};
use crate::ids::NodeId;

const DELIMITER: &str = "---";

/// A node document read back from its markdown form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDocument {
    pub id: NodeId,
    pub created: String,
    pub body: String,
}

/// Render the markdown file for a node: front matter, blank line, body.
///
/// The body is inserted verbatim; callers trim and reject empty input.
pub fn format_document(body: &str, id: &NodeId, timestamp: &str) -> String {
    let mut out = String::with_capacity(body.len() + 80);
    out.push_str("---\n");
    out.push_str(&format!("id: {id}\n"));
    out.push_str(&format!("created: {timestamp}\n"));
    out.push_str("---\n\n");
    out.push_str(body);
    out
}

/// Parse a node file produced by [`format_document`].
///
/// The front matter must hold exactly `id` and `created`, in that order.
pub fn parse_document(text: &str) -> Result<NodeDocument> {
    let mut lines = text.splitn(5, '\n');

    let open = lines.next().unwrap_or_default();
    if open.trim_end_matches('\r') != DELIMITER {
        return Err(Error::InvalidDocument(
            "missing opening front matter delimiter".to_string(),
        ));
    }

    let id_line = lines.next().unwrap_or_default().trim_end_matches('\r');
    let id = id_line
        .strip_prefix("id: ")
        .ok_or_else(|| Error::InvalidDocument(format!("expected id field, got '{id_line}'")))?;
    let id = NodeId::parse(id)?;

    let created_line = lines.next().unwrap_or_default().trim_end_matches('\r');
    let created = created_line.strip_prefix("created: ").ok_or_else(|| {
        Error::InvalidDocument(format!("expected created field, got '{created_line}'"))
    })?;
    if chrono::DateTime::parse_from_rfc3339(created).is_err() {
        return Err(Error::InvalidDocument(format!(
            "created is not an ISO 8601 instant: {created}"
        )));
    }

    let close = lines.next().unwrap_or_default();
    if close.trim_end_matches('\r') != DELIMITER {
        return Err(Error::InvalidDocument(
            "front matter must hold exactly id and created".to_string(),
        ));
    }

    let rest = lines.next().unwrap_or_default();
    let body = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))
        .ok_or_else(|| {
            Error::InvalidDocument("expected a blank line after front matter".to_string())
        })?;

    Ok(NodeDocument {
        id,
        created: created.to_string(),
        body: body.to_string(),
    })
}
