//! Heading anchor generation.

use std::collections::HashMap;

/// Convert text to a URL-safe slug.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Hands out slugs that are unique within one document.
///
/// Repeats get a numeric suffix: `usage`, `usage-1`, `usage-2`.
#[derive(Debug, Default)]
pub struct Slugger {
    occurrences: HashMap<String, usize>,
}

impl Slugger {
    /// Create an empty slugger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Unique slug for heading `text`.
    pub fn slug(&mut self, text: &str) -> String {
        let mut original = slugify(text);
        if original.is_empty() {
            original = "section".to_string();
        }

        let mut result = original.clone();
        while self.occurrences.contains_key(&result) {
            let count = self.occurrences.entry(original.clone()).or_default();
            *count += 1;
            result = format!("{original}-{count}");
        }
        self.occurrences.insert(result.clone(), 0);
        result
    }

    /// Reserve an author-supplied id so later generated slugs avoid it.
    ///
    /// An id that an earlier heading already received is returned unchanged:
    /// that earlier anchor has been emitted and cannot be renamed, so the
    /// document ends up with a duplicate that `tocspy check` reports.
    pub fn claim(&mut self, id: &str) -> String {
        if self.occurrences.contains_key(id) {
            tracing::warn!(id, "explicit heading id is already in use");
        } else {
            self.occurrences.insert(id.to_string(), 0);
        }
        id.to_string()
    }

    /// Forget all issued slugs.
    pub fn reset(&mut self) {
        self.occurrences.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Test 123 Post"), "test-123-post");
        assert_eq!(slugify("Multiple   Spaces"), "multiple-spaces");
        assert_eq!(slugify("Special!@#Chars"), "specialchars");
        assert_eq!(slugify("snake_case_name"), "snake-case-name");
        assert_eq!(slugify("Ünïcödé Straße"), "ünïcödé-straße");
    }

    #[test]
    fn test_slugger_suffixes_repeats() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.slug("Usage"), "usage");
        assert_eq!(slugger.slug("Usage"), "usage-1");
        assert_eq!(slugger.slug("usage!"), "usage-2");
    }

    #[test]
    fn test_slugger_avoids_natural_collision() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.slug("Step"), "step");
        assert_eq!(slugger.slug("Step 1"), "step-1");
        assert_eq!(slugger.slug("Step"), "step-2");
    }

    #[test]
    fn test_slugger_respects_claimed_ids() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.claim("install"), "install");
        assert_eq!(slugger.slug("Install"), "install-1");
    }

    #[test]
    fn test_slugger_claim_after_generated_slug_collides() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.slug("Install"), "install");
        assert_eq!(slugger.claim("install"), "install");
        assert_eq!(slugger.slug("Install"), "install-1");
    }

    #[test]
    fn test_slugger_empty_text() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.slug("!!!"), "section");
        assert_eq!(slugger.slug(""), "section-1");

        slugger.reset();
        assert_eq!(slugger.slug("?"), "section");
    }
}
