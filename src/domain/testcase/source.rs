//! SourceInput - validated input for one generation invocation.

use thiserror::Error;

/// Maximum number of test cases a single invocation may request.
///
/// Bounds response size and provider cost; larger requests are clamped, not
/// rejected.
pub const MAX_CASES: u32 = 100;

/// Maximum document context characters embedded in a prompt.
pub const MAX_CONTEXT_CHARS: usize = 2000;

/// Errors raised while constructing a [`SourceInput`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SourceError {
    /// Neither a topic nor extracted document text was provided.
    #[error("no topic or document text provided")]
    Empty,
}

/// Input to one generation invocation.
///
/// Immutable once constructed. The topic is the caller's free-text
/// instruction; `context` carries document text extracted by an external
/// collaborator (PDF/image extraction is out of scope here).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInput {
    topic: String,
    context: Option<String>,
    num_cases: u32,
}

impl SourceInput {
    /// Creates a validated source input.
    ///
    /// The requested case count is clamped to `1..=MAX_CASES`. Fails with
    /// [`SourceError::Empty`] when both the topic and the context are empty
    /// or whitespace-only.
    pub fn new(
        topic: impl Into<String>,
        context: Option<String>,
        num_cases: u32,
    ) -> Result<Self, SourceError> {
        let topic = topic.into().trim().to_string();
        let context = context
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        if topic.is_empty() && context.is_none() {
            return Err(SourceError::Empty);
        }

        Ok(Self {
            topic,
            context,
            num_cases: num_cases.clamp(1, MAX_CASES),
        })
    }

    /// The caller's topic or instruction text.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Extracted document text, if any.
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Document context truncated to [`MAX_CONTEXT_CHARS`] for prompting.
    pub fn truncated_context(&self) -> Option<&str> {
        self.context.as_deref().map(|c| {
            let end = c
                .char_indices()
                .nth(MAX_CONTEXT_CHARS)
                .map(|(i, _)| i)
                .unwrap_or(c.len());
            &c[..end]
        })
    }

    /// Number of cases to request, already clamped.
    pub fn num_cases(&self) -> u32 {
        self.num_cases
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_topic_only() {
        let input = SourceInput::new("login API", None, 5).unwrap();
        assert_eq!(input.topic(), "login API");
        assert_eq!(input.num_cases(), 5);
        assert!(input.context().is_none());
    }

    #[test]
    fn accepts_context_only() {
        let input = SourceInput::new("", Some("extracted text".to_string()), 3).unwrap();
        assert_eq!(input.topic(), "");
        assert_eq!(input.context(), Some("extracted text"));
    }

    #[test]
    fn rejects_empty_source() {
        assert_eq!(SourceInput::new("", None, 5), Err(SourceError::Empty));
        assert_eq!(
            SourceInput::new("   ", Some("  \n ".to_string()), 5),
            Err(SourceError::Empty)
        );
    }

    #[test]
    fn clamps_case_count() {
        assert_eq!(SourceInput::new("t", None, 0).unwrap().num_cases(), 1);
        assert_eq!(SourceInput::new("t", None, 100).unwrap().num_cases(), 100);
        assert_eq!(SourceInput::new("t", None, 500).unwrap().num_cases(), 100);
    }

    #[test]
    fn truncates_context_for_prompting() {
        let long = "x".repeat(MAX_CONTEXT_CHARS + 500);
        let input = SourceInput::new("t", Some(long.clone()), 5).unwrap();

        // Full context preserved, truncated view bounded
        assert_eq!(input.context(), Some(long.as_str()));
        assert_eq!(input.truncated_context().unwrap().len(), MAX_CONTEXT_CHARS);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let long = "é".repeat(MAX_CONTEXT_CHARS + 10);
        let input = SourceInput::new("t", Some(long), 5).unwrap();
        let truncated = input.truncated_context().unwrap();
        assert_eq!(truncated.chars().count(), MAX_CONTEXT_CHARS);
    }

    #[test]
    fn trims_whitespace() {
        let input = SourceInput::new("  topic  ", Some("  ctx  ".to_string()), 5).unwrap();
        assert_eq!(input.topic(), "topic");
        assert_eq!(input.context(), Some("ctx"));
    }
}
