use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Remote repository that receives new nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub host: String,
    pub owner: String,
    pub repo: String,
    pub branch: String,
}

impl Default for Destination {
    fn default() -> Self {
        Self {
            host: "github.com".to_string(),
            owner: "simple-kb".to_string(),
            repo: "simple-kb.github.io".to_string(),
            branch: "main".to_string(),
        }
    }
}

impl Destination {
    /// Check every field can be inserted as a single URL path segment.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("host", &self.host),
            ("owner", &self.owner),
            ("repo", &self.repo),
            ("branch", &self.branch),
        ] {
            if value.is_empty() {
                return Err(Error::InvalidDestination(format!("{name} is empty")));
            }
            if let Some(bad) = value
                .chars()
                .find(|&ch| matches!(ch, '/' | '?' | '#' | '&') || ch.is_whitespace())
            {
                return Err(Error::InvalidDestination(format!(
                    "{name} contains '{bad}': {value}"
                )));
            }
        }
        Ok(())
    }

    /// Base of the "create new file" page, without query string.
    pub fn new_file_base(&self) -> String {
        format!(
            "https://{}/{}/{}/new/{}",
            self.host, self.owner, self.repo, self.branch
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_public_knowledge_base() {
        let destination = Destination::default();
        assert!(destination.validate().is_ok());
        assert_eq!(
            destination.new_file_base(),
            "https://github.com/simple-kb/simple-kb.github.io/new/main"
        );
    }

    #[test]
    fn rejects_fields_that_break_the_path() {
        let mut destination = Destination::default();
        destination.branch = "feature/x".to_string();
        assert!(matches!(
            destination.validate(),
            Err(Error::InvalidDestination(_))
        ));

        let mut destination = Destination::default();
        destination.owner = String::new();
        assert!(destination.validate().is_err());

        let mut destination = Destination::default();
        destination.repo = "my repo".to_string();
        assert!(destination.validate().is_err());
    }
}
