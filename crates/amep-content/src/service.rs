//! Content service: prompts in, typed study material out.
//!
//! Every public call is fire-and-forget. A failed request or an unparseable
//! payload is logged and the caller gets an empty result.

use crate::prompts;
use crate::types::{
    ContentError, ContentRequest, ContentResult, ContentType, EngagementSummary, PracticeQuestion, TopicContent,
};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::pin::Pin;

/// A boxed future for backend calls.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Something that can run a content request and return the raw JSON text.
pub trait ContentBackend {
    fn generate<'a>(&'a self, request: &'a ContentRequest) -> BoxFuture<'a, ContentResult<String>>;
}

pub struct ContentService<B: ContentBackend> {
    backend: B,
}

impl<B: ContentBackend> ContentService<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Practice questions targeting `gaps`, in the order the model returned.
    pub async fn adaptive_practice(&self, student_name: &str, subject: &str, gaps: &[String]) -> Vec<PracticeQuestion> {
        let request = prompts::adaptive_practice(student_name, subject, gaps);
        match self.request::<Option<Vec<PracticeQuestion>>>(&request).await {
            Ok(questions) => questions.unwrap_or_default(),
            Err(e) => {
                log::error!("Failed to generate practice set for {}: {}", student_name, e);
                Vec::new()
            }
        }
    }

    /// Engagement summary of classroom notes. Blank notes make no request.
    pub async fn summarize_engagement(&self, notes: &str) -> Option<EngagementSummary> {
        if notes.trim().is_empty() {
            return None;
        }
        let request = prompts::engagement_summary(notes);
        match self.request::<Option<EngagementSummary>>(&request).await {
            Ok(summary) => summary,
            Err(e) => {
                log::error!("Failed to summarize engagement: {}", e);
                None
            }
        }
    }

    /// Library content for a topic. A blank topic makes no request.
    pub async fn topic_content(&self, topic: &str, content_type: ContentType) -> Option<TopicContent> {
        let topic = topic.trim();
        if topic.is_empty() {
            return None;
        }
        let request = prompts::topic_content(topic, content_type);
        match self.request::<Option<TopicContent>>(&request).await {
            Ok(content) => content,
            Err(e) => {
                log::error!("Failed to generate {} for {:?}: {}", content_type, topic, e);
                None
            }
        }
    }

    /// Run `request` and parse the payload. Empty text parses as `null`.
    async fn request<T: DeserializeOwned>(&self, request: &ContentRequest) -> ContentResult<T> {
        let text = self.backend.generate(request).await?;
        let text = text.trim();
        let text = if text.is_empty() { "null" } else { text };
        serde_json::from_str(text).map_err(|e| ContentError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ModelTier;
    use std::cell::RefCell;

    fn block_on<F: Future>(f: F) -> F::Output {
        use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

        fn dummy_raw_waker() -> RawWaker {
            fn no_op(_: *const ()) {}
            fn clone(_: *const ()) -> RawWaker {
                dummy_raw_waker()
            }
            static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
            RawWaker::new(std::ptr::null(), &VTABLE)
        }

        let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
        let mut cx = Context::from_waker(&waker);
        let mut f = std::pin::pin!(f);

        loop {
            if let Poll::Ready(result) = f.as_mut().poll(&mut cx) {
                return result;
            }
        }
    }

    /// Backend returning a canned reply and recording every request.
    struct FakeBackend {
        reply: Result<String, String>,
        seen: RefCell<Vec<ContentRequest>>,
    }

    impl FakeBackend {
        fn ok(body: &str) -> Self {
            Self { reply: Ok(body.to_string()), seen: RefCell::new(Vec::new()) }
        }

        fn failing() -> Self {
            Self { reply: Err("connection refused".to_string()), seen: RefCell::new(Vec::new()) }
        }

        fn calls(&self) -> usize {
            self.seen.borrow().len()
        }
    }

    impl ContentBackend for FakeBackend {
        fn generate<'a>(&'a self, request: &'a ContentRequest) -> BoxFuture<'a, ContentResult<String>> {
            self.seen.borrow_mut().push(request.clone());
            let reply = self.reply.clone().map_err(ContentError::Request);
            Box::pin(async move { reply })
        }
    }

    #[test]
    fn test_practice_parsed_in_order() {
        let body = r#"[
            {"question":"Q1","options":["a","b"],"correctAnswer":"a","explanation":"e1"},
            {"question":"Q2","options":["c","d"],"correctAnswer":"d","explanation":"e2"}
        ]"#;
        let service = ContentService::new(FakeBackend::ok(body));
        let questions = block_on(service.adaptive_practice("Alex", "Physics", &["Waves".to_string()]));

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].question, "Q1");
        assert_eq!(questions[1].correct_answer, "d");
        assert_eq!(service.backend().seen.borrow()[0].tier, ModelTier::Pro);
    }

    #[test]
    fn test_practice_degrades_to_empty() {
        let service = ContentService::new(FakeBackend::failing());
        assert!(block_on(service.adaptive_practice("Alex", "Physics", &[])).is_empty());

        let service = ContentService::new(FakeBackend::ok("not json"));
        assert!(block_on(service.adaptive_practice("Alex", "Physics", &[])).is_empty());

        let service = ContentService::new(FakeBackend::ok(""));
        assert!(block_on(service.adaptive_practice("Alex", "Physics", &[])).is_empty());
    }

    #[test]
    fn test_summary_clamps_index() {
        let body = r#"{"index":130,"takeaways":["a","b","c"],"sentiment":"positive"}"#;
        let service = ContentService::new(FakeBackend::ok(body));
        let summary = block_on(service.summarize_engagement("lively debate")).unwrap();

        assert_eq!(summary.index, 100);
        assert_eq!(summary.takeaways.len(), 3);
        assert_eq!(service.backend().seen.borrow()[0].tier, ModelTier::Flash);
    }

    #[test]
    fn test_blank_notes_skip_request() {
        let service = ContentService::new(FakeBackend::ok("{}"));
        assert!(block_on(service.summarize_engagement("   ")).is_none());
        assert_eq!(service.backend().calls(), 0);
    }

    #[test]
    fn test_summary_failure_is_none() {
        let service = ContentService::new(FakeBackend::failing());
        assert!(block_on(service.summarize_engagement("quiet room")).is_none());
        assert_eq!(service.backend().calls(), 1);
    }

    #[test]
    fn test_topic_content() {
        let body = r#"{"title":"Entropy","content":"Disorder.","items":[{"question":"S?","answer":"J/K","hint":"units"}]}"#;
        let service = ContentService::new(FakeBackend::ok(body));
        let topic = block_on(service.topic_content(" Entropy ", ContentType::Quiz)).unwrap();

        assert_eq!(topic.title, "Entropy");
        assert_eq!(topic.items[0].hint.as_deref(), Some("units"));
        assert!(service.backend().seen.borrow()[0].prompt.contains("\"Entropy\""));
    }

    #[test]
    fn test_blank_topic_skips_request() {
        let service = ContentService::new(FakeBackend::ok("{}"));
        assert!(block_on(service.topic_content("", ContentType::Summary)).is_none());
        assert_eq!(service.backend().calls(), 0);
    }

    #[test]
    fn test_topic_missing_fields_is_none() {
        let service = ContentService::new(FakeBackend::ok(r#"{"title":"Only a title"}"#));
        assert!(block_on(service.topic_content("Waves", ContentType::Summary)).is_none());
    }
}
