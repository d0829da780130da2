use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::config::Destination;

/// Characters left as-is by component encoding: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a query value. Space becomes `%20`, never `+`.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Build the pre-filled "create new file" URL on `destination`.
///
/// `path` goes in unencoded; it is always built from the node directory, a
/// hex/hyphen id and the node extension.
pub fn compose_link(destination: &Destination, path: &str, content: &str, message: &str) -> String {
    format!(
        "{}?filename={}&value={}&message={}",
        destination.new_file_base(),
        path,
        encode_component(content),
        encode_component(message)
    )
}
