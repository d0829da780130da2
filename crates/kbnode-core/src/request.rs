use serde::Serialize;

use crate::config::Destination;
use crate::document::format_document;
use crate::ids::NodeId;
use crate::link::compose_link;
use crate::{COMMIT_VERB, NODE_DIR, NODE_EXTENSION};

/// Everything the hosting platform needs to create one node file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreationRequest {
    pub id: NodeId,
    pub created: String,
    /// Repository-relative file path, `kb/<id>.md`.
    pub path: String,
    /// Full file content including front matter.
    pub content: String,
    /// Change description, `Create node <id>`.
    pub message: String,
}

impl CreationRequest {
    pub fn new(body: &str, id: NodeId, created: String) -> Self {
        let path = node_path(&id);
        let content = format_document(body, &id, &created);
        let message = format!("{COMMIT_VERB} node {id}");
        Self {
            id,
            created,
            path,
            content,
            message,
        }
    }

    pub fn to_link(&self, destination: &Destination) -> String {
        compose_link(destination, &self.path, &self.content, &self.message)
    }
}

/// Repository path of the file that holds node `id`.
pub fn node_path(id: &NodeId) -> String {
    format!("{NODE_DIR}/{id}.{NODE_EXTENSION}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_path_and_message_from_id() {
        let id = NodeId::parse("01234567-89ab-4cde-9f01-23456789abcd").expect("valid id");
        let request = CreationRequest::new("body", id, "2024-01-15T10:30:00.000Z".to_string());
        assert_eq!(request.path, "kb/01234567-89ab-4cde-9f01-23456789abcd.md");
        assert_eq!(
            request.message,
            "Create node 01234567-89ab-4cde-9f01-23456789abcd"
        );
        assert!(request.content.ends_with("\n\nbody"));
    }
}
