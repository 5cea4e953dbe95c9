//! Chat service: Answers free-text sleep apnea questions.

use crate::adapters::ChaChaChoice;
use crate::domain::{ChatQuery, ChatResponse, Intent, KnowledgeBase, TopicClassifier};
use crate::ports::ChoiceSource;

/// Builds reply text for a classified intent.
pub struct ResponseComposer<'kb, R: ChoiceSource> {
    kb: &'kb KnowledgeBase,
    choice: R,
}

impl<'kb, R: ChoiceSource> ResponseComposer<'kb, R> {
    pub fn new(kb: &'kb KnowledgeBase, choice: R) -> Self {
        Self { kb, choice }
    }

    /// Compose the reply for an intent.
    ///
    /// A matched topic yields one of its responses followed by the topic's
    /// follow-up question.
    #[must_use]
    pub fn compose(&self, intent: Intent) -> String {
        match intent {
            Intent::Greeting => self.pick(self.kb.greetings).to_string(),
            Intent::Farewell => self.pick(self.kb.farewells).to_string(),
            Intent::Question(matched) => match matched.topic {
                Some(topic) => format!("{} {}", self.pick(topic.responses()), topic.follow_up()),
                None => self.pick(self.kb.fallbacks).to_string(),
            },
        }
    }

    fn pick(&self, options: &'static [&'static str]) -> &'static str {
        if options.is_empty() {
            return "";
        }
        let idx = self.choice.pick(options.len()).min(options.len() - 1);
        options[idx]
    }
}

/// Stateless question-answering front end.
pub struct ChatService<R: ChoiceSource = ChaChaChoice> {
    classifier: TopicClassifier<'static>,
    composer: ResponseComposer<'static, R>,
}

impl ChatService<ChaChaChoice> {
    /// Service over the built-in knowledge base with an entropy-seeded RNG.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(ChaChaChoice::from_entropy())
    }
}

impl<R: ChoiceSource> ChatService<R> {
    /// Create a chat service over the built-in knowledge base.
    pub fn new(choice: R) -> Self {
        Self::with_knowledge_base(KnowledgeBase::standard(), choice)
    }

    pub fn with_knowledge_base(kb: &'static KnowledgeBase, choice: R) -> Self {
        Self {
            classifier: TopicClassifier::new(kb),
            composer: ResponseComposer::new(kb, choice),
        }
    }

    #[must_use]
    pub fn classify(&self, query: &ChatQuery) -> Intent {
        self.classifier.classify(&query.raw_text)
    }

    /// Answer a query.
    ///
    /// The query text is not logged; only its length and resolved intent are.
    #[must_use]
    pub fn respond_to_query(&self, query: &ChatQuery) -> ChatResponse {
        let intent = self.classify(query);

        match intent {
            Intent::Question(matched) => tracing::debug!(
                query_len = query.raw_text.len(),
                topic = matched.topic.map_or("none", |t| t.name()),
                score = matched.score,
                "Chat query classified"
            ),
            other => tracing::debug!(query_len = query.raw_text.len(), intent = ?other, "Chat query classified"),
        }

        ChatResponse {
            text: self.composer.compose(intent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Topic, TopicMatch};

    /// Always returns the same index.
    struct FixedChoice(usize);

    impl ChoiceSource for FixedChoice {
        fn pick(&self, _len: usize) -> usize {
            self.0
        }
    }

    #[test]
    fn test_greeting_reply() {
        let service = ChatService::new(FixedChoice(1));
        let reply = service.respond_to_query(&ChatQuery::new("hi there"));
        assert_eq!(reply.text, KnowledgeBase::standard().greetings[1]);
    }

    #[test]
    fn test_farewell_reply() {
        let service = ChatService::new(FixedChoice(4));
        let reply = service.respond_to_query(&ChatQuery::new("thank you!"));
        assert_eq!(reply.text, KnowledgeBase::standard().farewells[4]);
    }

    #[test]
    fn test_topic_reply_has_follow_up() {
        let service = ChatService::new(FixedChoice(2));
        let reply = service.respond_to_query(&ChatQuery::new("Tell me about CPAP therapy"));
        let expected = format!("{} {}", Topic::Cpap.responses()[2], Topic::Cpap.follow_up());
        assert_eq!(reply.text, expected);
    }

    #[test]
    fn test_fallback_reply() {
        let service = ChatService::new(FixedChoice(0));
        let reply = service.respond_to_query(&ChatQuery::new("I have loud snoring and morning headaches"));
        assert_eq!(reply.text, KnowledgeBase::standard().fallbacks[0]);
    }

    #[test]
    fn test_out_of_range_choice_is_clamped() {
        let composer = ResponseComposer::new(KnowledgeBase::standard(), FixedChoice(99));
        let text = composer.compose(Intent::Question(TopicMatch {
            topic: Some(Topic::Elderly),
            score: 1,
        }));
        assert!(text.starts_with(Topic::Elderly.responses()[2]));
    }

    #[test]
    fn test_seeded_service_is_deterministic() {
        let a = ChatService::new(ChaChaChoice::seeded(11));
        let b = ChatService::new(ChaChaChoice::seeded(11));
        for text in ["hello", "what causes apnea", "bye", "?", "pregnant and snoring"] {
            let query = ChatQuery::new(text);
            assert_eq!(a.respond_to_query(&query), b.respond_to_query(&query));
        }
    }

    #[test]
    fn test_standard_service_replies() {
        let service = ChatService::standard();
        let reply = service.respond_to_query(&ChatQuery::new("What are the symptoms and warning signs?"));
        assert!(reply.text.ends_with(Topic::Symptoms.follow_up()));
        assert!(Topic::Symptoms
            .responses()
            .iter()
            .any(|r| reply.text.starts_with(r)));
    }
}
