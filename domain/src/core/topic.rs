//! Topic value object

use serde::{Deserialize, Serialize};

/// The decision question put before the council (Value Object)
///
/// Carries the original topic text plus optional feature context.
/// The original casing is preserved because question-pattern matching
/// runs against the raw topic, while keyword scoring lowercases it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    content: String,
    context: Option<String>,
}

impl Topic {
    /// Create a new topic
    ///
    /// # Panics
    /// Panics if the content is empty or only whitespace
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        assert!(!content.trim().is_empty(), "Topic cannot be empty");
        Self {
            content,
            context: None,
        }
    }

    /// Try to create a new topic, returning None if invalid
    pub fn try_new(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            None
        } else {
            Some(Self {
                content,
                context: None,
            })
        }
    }

    /// Attach feature context to the topic
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Get the topic content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the feature context, if any
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Lowercased topic + context, the text keyword scoring runs over
    pub fn search_text(&self) -> String {
        match &self.context {
            Some(ctx) => format!("{} {}", self.content, ctx).to_lowercase(),
            None => self.content.to_lowercase(),
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl From<&str> for Topic {
    fn from(s: &str) -> Self {
        Topic::new(s)
    }
}

impl From<String> for Topic {
    fn from(s: String) -> Self {
        Topic::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_creation() {
        let t = Topic::new("Should we add OAuth2 authentication?");
        assert_eq!(t.content(), "Should we add OAuth2 authentication?");
        assert!(t.context().is_none());
    }

    #[test]
    fn test_topic_with_context() {
        let t = Topic::new("Add caching").with_context("API latency is high");
        assert_eq!(t.context(), Some("API latency is high"));
    }

    #[test]
    fn test_search_text_lowercases_and_joins() {
        let t = Topic::new("Add OAuth2").with_context("Security Review");
        assert_eq!(t.search_text(), "add oauth2 security review");
    }

    #[test]
    #[should_panic]
    fn test_empty_topic_panics() {
        Topic::new("   ");
    }

    #[test]
    fn test_try_new() {
        assert!(Topic::try_new("").is_none());
        assert!(Topic::try_new("Migrate the database").is_some());
    }
}
