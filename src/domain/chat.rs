//! Chat query types and keyword-based topic classification.

use serde::{Deserialize, Serialize};

use super::knowledge::{KnowledgeBase, Topic};

/// Free-text question from the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatQuery {
    pub raw_text: String,
}

impl ChatQuery {
    #[must_use]
    pub fn new(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
        }
    }
}

/// Reply text sent back to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(rename = "response")]
    pub text: String,
}

/// Best topic found by keyword scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicMatch {
    /// `None` when no keyword of any topic occurs in the query
    pub topic: Option<Topic>,
    /// Number of the topic's keyword phrases found in the query
    pub score: usize,
}

/// What the user is trying to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    Farewell,
    Question(TopicMatch),
}

/// Classifies queries against an immutable [`KnowledgeBase`].
#[derive(Debug, Clone, Copy)]
pub struct TopicClassifier<'kb> {
    kb: &'kb KnowledgeBase,
}

impl Default for TopicClassifier<'static> {
    fn default() -> Self {
        Self::new(KnowledgeBase::standard())
    }
}

impl<'kb> TopicClassifier<'kb> {
    #[must_use]
    pub fn new(kb: &'kb KnowledgeBase) -> Self {
        Self { kb }
    }

    #[must_use]
    pub fn knowledge_base(&self) -> &'kb KnowledgeBase {
        self.kb
    }

    /// Resolve the intent of a query.
    ///
    /// Matching is plain substring containment on the lowercased, trimmed
    /// text, so a greeting trigger like "hi" also fires inside longer words.
    /// Greetings take precedence over farewells, which take precedence over
    /// topic scoring.
    #[must_use]
    pub fn classify(&self, text: &str) -> Intent {
        let normalized = text.trim().to_lowercase();

        if contains_any(&normalized, self.kb.greeting_triggers) {
            return Intent::Greeting;
        }
        if contains_any(&normalized, self.kb.farewell_triggers) {
            return Intent::Farewell;
        }

        Intent::Question(self.best_topic(&normalized))
    }

    /// Score every topic and keep the strictly highest; the first topic to
    /// reach a score wins ties.
    #[must_use]
    pub fn best_topic(&self, normalized: &str) -> TopicMatch {
        let mut best = TopicMatch {
            topic: None,
            score: 0,
        };

        for topic in &self.kb.topics {
            let score = topic
                .keywords()
                .iter()
                .filter(|keyword| normalized.contains(*keyword))
                .count();
            if score > best.score {
                best = TopicMatch {
                    topic: Some(*topic),
                    score,
                };
            }
        }

        best
    }
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| text.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(topic: Option<Topic>, score: usize) -> Intent {
        Intent::Question(TopicMatch { topic, score })
    }

    #[test]
    fn test_greeting_short_circuits() {
        let classifier = TopicClassifier::default();
        assert_eq!(classifier.classify("hi there"), Intent::Greeting);
        assert_eq!(classifier.classify("  Good Evening  "), Intent::Greeting);
        // "hi" inside "children" still counts as a greeting
        assert_eq!(classifier.classify("What are the symptoms in children?"), Intent::Greeting);
    }

    #[test]
    fn test_farewell_short_circuits() {
        let classifier = TopicClassifier::default();
        assert_eq!(classifier.classify("Thanks, bye"), Intent::Farewell);
        assert_eq!(classifier.classify("see you"), Intent::Farewell);
    }

    #[test]
    fn test_exact_keywords_drive_match() {
        let classifier = TopicClassifier::default();
        assert_eq!(
            classifier.classify("What are the symptoms and warning signs?"),
            question(Some(Topic::Symptoms), 3)
        );
        // None of the symptom phrases occur verbatim, so nothing matches
        assert_eq!(
            classifier.classify("I have loud snoring and morning headaches"),
            question(None, 0)
        );
    }

    #[test]
    fn test_highest_score_wins() {
        let classifier = TopicClassifier::default();
        assert_eq!(
            classifier.classify("Tell me about CPAP therapy"),
            question(Some(Topic::Cpap), 2)
        );
        assert_eq!(
            classifier.classify("is there a cure or treatment"),
            question(Some(Topic::Treatment), 2)
        );
    }

    #[test]
    fn test_ties_keep_first_topic() {
        let classifier = TopicClassifier::default();
        // "therapy" is a keyword of both treatment and cpap
        assert_eq!(classifier.classify("therapy"), question(Some(Topic::Treatment), 1));
        // "diet" is a keyword of both lifestyle and diet
        assert_eq!(classifier.classify("diet"), question(Some(Topic::Lifestyle), 1));
    }

    #[test]
    fn test_no_match() {
        let classifier = TopicClassifier::default();
        assert_eq!(classifier.classify(""), question(None, 0));
        assert_eq!(classifier.classify("purple elephants"), question(None, 0));
    }

    #[test]
    fn test_custom_topic_order() {
        let mut kb = KnowledgeBase::standard().clone();
        kb.topics = vec![Topic::Cpap, Topic::Treatment];
        let classifier = TopicClassifier::new(&kb);
        assert_eq!(classifier.classify("therapy"), question(Some(Topic::Cpap), 1));
        assert_eq!(classifier.classify("what is sleep apnea"), question(None, 0));
    }
}
