use std::io;

use rand::RngCore;
use serde::Serialize;
use thiserror::Error;

use crate::EMPTY_INPUT_MESSAGE;
use crate::clock::{Clock, current_timestamp};
use crate::config::Destination;
use crate::ids::{NodeId, generate_node_id};
use crate::request::CreationRequest;

/// Errors surfaced to the person submitting a node.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("{}", EMPTY_INPUT_MESSAGE)]
    EmptyInput,
}

/// Capability that hands a URL to something able to show it, e.g. a browser.
pub trait LinkOpener {
    fn open(&mut self, url: &str) -> io::Result<()>;
}

impl<T: LinkOpener + ?Sized> LinkOpener for Box<T> {
    fn open(&mut self, url: &str) -> io::Result<()> {
        (**self).open(url)
    }
}

/// Opener that does nothing, for callers that only want the URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopOpener;

impl LinkOpener for NoopOpener {
    fn open(&mut self, _url: &str) -> io::Result<()> {
        Ok(())
    }
}

/// Result of one accepted submission.
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub request: CreationRequest,
    pub url: String,
    /// Whether the opener accepted the URL.
    pub opened: bool,
}

/// Runs the node pipeline with injected clock, random source and opener.
pub struct Submitter<C, R, O> {
    destination: Destination,
    clock: C,
    rng: R,
    opener: O,
}

impl<C, R, O> Submitter<C, R, O>
where
    C: Clock,
    R: RngCore,
    O: LinkOpener,
{
    pub fn new(destination: Destination, clock: C, rng: R, opener: O) -> Self {
        Self {
            destination,
            clock,
            rng,
            opener,
        }
    }

    pub fn opener(&self) -> &O {
        &self.opener
    }

    /// Turn raw input into a node link and hand it to the opener.
    ///
    /// Input is trimmed first; blank input is rejected before an id or a
    /// timestamp is drawn. A failing opener is logged, not returned.
    pub fn submit(&mut self, raw: &str) -> Result<Submission, SubmitError> {
        let body = accept_body(raw)?;
        let id = generate_node_id(&mut self.rng);
        Ok(self.finish(body, id))
    }

    /// Same as [`Submitter::submit`] but with a caller-chosen id.
    pub fn submit_as(&mut self, raw: &str, id: NodeId) -> Result<Submission, SubmitError> {
        let body = accept_body(raw)?;
        Ok(self.finish(body, id))
    }

    fn finish(&mut self, body: &str, id: NodeId) -> Submission {
        let created = current_timestamp(&self.clock);
        let request = CreationRequest::new(body, id, created);
        let url = request.to_link(&self.destination);

        tracing::info!(
            event = "node_composed",
            node_id = %request.id,
            path = %request.path,
            url_len = url.len()
        );

        let opened = match self.opener.open(&url) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(event = "open_failed", node_id = %request.id, error = %err);
                false
            }
        };

        Submission {
            request,
            url,
            opened,
        }
    }
}

/// Whitespace stripped around a submission: Unicode white space plus the
/// byte order mark, but not NEL (U+0085).
fn is_edge_whitespace(ch: char) -> bool {
    (ch.is_whitespace() && ch != '\u{85}') || ch == '\u{FEFF}'
}

fn accept_body(raw: &str) -> Result<&str, SubmitError> {
    let body = raw.trim_matches(is_edge_whitespace);
    if body.is_empty() {
        tracing::warn!(event = "submission_rejected", reason = "empty_input");
        return Err(SubmitError::EmptyInput);
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{TimeZone, Utc};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    struct FailingOpener;

    impl LinkOpener for FailingOpener {
        fn open(&mut self, _url: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::NotFound, "no browser"))
        }
    }

    fn clock() -> FixedClock {
        FixedClock(
            Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0)
                .single()
                .expect("valid instant"),
        )
    }

    #[test]
    fn trims_input_before_formatting() {
        let mut submitter = Submitter::new(
            Destination::default(),
            clock(),
            ChaCha8Rng::seed_from_u64(5),
            NoopOpener,
        );
        let submission = submitter.submit("  \n body text \t\n").expect("accepted");
        assert!(submission.request.content.ends_with("\n\nbody text"));
        assert!(submission.opened);
    }

    #[test]
    fn byte_order_marks_are_trimmed_but_nel_is_kept() {
        let mut submitter = Submitter::new(
            Destination::default(),
            clock(),
            ChaCha8Rng::seed_from_u64(5),
            NoopOpener,
        );
        assert_eq!(
            submitter.submit("\u{FEFF} \u{FEFF}").unwrap_err(),
            SubmitError::EmptyInput
        );

        let submission = submitter.submit("\u{FEFF}hello\u{FEFF}").expect("accepted");
        assert!(submission.request.content.ends_with("\n\nhello"));

        let submission = submitter.submit("\u{85}note\u{85}").expect("accepted");
        assert!(submission.request.content.ends_with("\n\n\u{85}note\u{85}"));
    }

    #[test]
    fn opener_failure_does_not_fail_submission() {
        let mut submitter = Submitter::new(
            Destination::default(),
            clock(),
            ChaCha8Rng::seed_from_u64(5),
            FailingOpener,
        );
        let submission = submitter.submit("note").expect("accepted");
        assert!(!submission.opened);
        assert!(submission.url.contains("value="));
    }

    #[test]
    fn each_submission_gets_a_fresh_id() {
        let mut submitter = Submitter::new(
            Destination::default(),
            clock(),
            ChaCha8Rng::seed_from_u64(11),
            NoopOpener,
        );
        let first = submitter.submit("one").expect("accepted");
        let second = submitter.submit("one").expect("accepted");
        assert_ne!(first.request.id, second.request.id);
        assert_ne!(first.url, second.url);
    }

    #[test]
    fn empty_input_message_is_user_facing() {
        assert_eq!(SubmitError::EmptyInput.to_string(), "Please enter some content");
    }
}
