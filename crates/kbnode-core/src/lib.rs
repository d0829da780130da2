//! Core pipeline for kbnode.
//!
//! This crate turns a piece of free text into a knowledge-base node: a fresh
//! identifier, a creation timestamp, a markdown document with front matter,
//! and a pre-filled "create new file" link on the hosting platform.

pub mod clock;
pub mod config;
pub mod document;
pub mod error;
pub mod ids;
pub mod link;
pub mod request;
pub mod submit;

pub use clock::{Clock, FixedClock, SystemClock, current_timestamp, format_timestamp};
pub use config::Destination;
pub use document::{NodeDocument, format_document, parse_document};
pub use error::{Error, Result};
pub use ids::{NodeId, generate_node_id};
pub use link::{compose_link, encode_component};
pub use request::CreationRequest;
pub use submit::{LinkOpener, NoopOpener, SubmitError, Submission, Submitter};

/// Directory inside the knowledge-base repository that holds node files.
pub const NODE_DIR: &str = "kb";

/// File extension of node files.
pub const NODE_EXTENSION: &str = "md";

/// Verb used in the change description of every new node.
pub const COMMIT_VERB: &str = "Create";

/// Warning surfaced to the user when a submission has no content.
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter some content";
