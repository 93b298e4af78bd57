use std::sync::Mutex;

use async_trait::async_trait;
use llmhub::session::Side;
use llmhub::ui::{ChatApp, SubmitOutcome, UiError, render};
use llmhub::{ChatMessage, ChatRole, TextGenerator, strip_reasoning};

/// Generator that replays canned replies and records what it was asked.
struct StubGenerator {
    replies: Mutex<Vec<Option<String>>>,
    calls: Mutex<Vec<(String, Option<Vec<ChatMessage>>, String)>>,
}

impl StubGenerator {
    fn new(replies: Vec<Option<&str>>) -> Self {
        Self {
            replies: Mutex::new(
                replies
                    .into_iter()
                    .rev()
                    .map(|r| r.map(str::to_string))
                    .collect(),
            ),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate_text(
        &self,
        model: &str,
        history: Option<&[ChatMessage]>,
        prompt: &str,
    ) -> Option<String> {
        self.calls.lock().unwrap().push((
            model.to_string(),
            history.map(<[ChatMessage]>::to_vec),
            prompt.to_string(),
        ));
        self.replies.lock().unwrap().pop().flatten()
    }
}

#[tokio::test]
async fn submit_appends_user_and_assistant_turns() {
    let mut app = ChatApp::new(StubGenerator::new(vec![Some("4")]))
        .with_model("llama-3.3-70b-versatile")
        .unwrap();

    let outcome = app.submit("2+2?").await;

    assert_eq!(outcome, SubmitOutcome::Generated);
    let log = app.session().messages();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].role, ChatRole::User);
    assert_eq!(log[0].content, "2+2?");
    assert_eq!(log[0].model.as_deref(), Some("llama-3.3-70b-versatile"));
    assert_eq!(log[1].role, ChatRole::Assistant);
    assert_eq!(log[1].content, "4");

    let pairs = app.session().pair_for_display();
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].user, &log[0]);
    assert_eq!(pairs[0].assistant, Some(&log[1]));
}

#[tokio::test]
async fn failed_generation_leaves_log_unchanged() {
    let mut app = ChatApp::new(StubGenerator::new(vec![Some("hello"), None]));

    assert_eq!(app.submit("hi").await, SubmitOutcome::Generated);
    let before = app.session().len();

    assert_eq!(app.submit("and now?").await, SubmitOutcome::Failed);
    assert_eq!(app.session().len(), before);
}

#[tokio::test]
async fn empty_reply_counts_as_failure() {
    let reasoning_only = strip_reasoning("<think>only reasoning</think>");
    let mut app = ChatApp::new(StubGenerator::new(vec![Some(reasoning_only.as_str()), Some("")]));

    assert_eq!(app.submit("hi").await, SubmitOutcome::Failed);
    assert_eq!(app.submit("hi again").await, SubmitOutcome::Failed);
    assert!(app.session().is_empty());
}

#[tokio::test]
async fn history_is_sent_explicitly_on_every_submit() {
    let mut app = ChatApp::new(StubGenerator::new(vec![Some("hello"), Some("fine")]))
        .with_model("gemma2-9b-it")
        .unwrap();

    app.submit("hi").await;
    app.submit("how are you?").await;

    let calls = app.generator().calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 2);

    let (model, history, prompt) = &calls[0];
    assert_eq!(model, "gemma2-9b-it");
    assert_eq!(history.as_deref(), Some(&[][..]));
    assert_eq!(prompt, "hi");

    let (_, history, prompt) = &calls[1];
    assert_eq!(
        history.as_deref(),
        Some(&[ChatMessage::user("hi"), ChatMessage::assistant("hello")][..])
    );
    assert_eq!(prompt, "how are you?");
}

#[tokio::test]
async fn blank_prompt_is_rejected_before_calling_the_client() {
    let mut app = ChatApp::new(StubGenerator::new(vec![]));

    assert_eq!(app.submit("").await, SubmitOutcome::MissingInput);
    assert_eq!(app.submit("   ").await, SubmitOutcome::MissingInput);
    assert!(app.session().is_empty());
}

#[tokio::test]
async fn unsupported_model_is_rejected() {
    let mut app = ChatApp::new(StubGenerator::new(vec![]));

    assert_eq!(
        app.select_model("gpt-2"),
        Err(UiError::UnsupportedModel("gpt-2".to_string()))
    );
    assert_eq!(app.model(), "llama-3.3-70b-versatile");

    app.select_model("deepseek-r1-distill-llama-70b").unwrap();
    assert_eq!(app.model(), "deepseek-r1-distill-llama-70b");
}

#[tokio::test]
async fn expand_validates_conversation_number() {
    let mut app = ChatApp::new(StubGenerator::new(vec![Some("hello")]));
    app.submit("hi").await;

    assert!(app.toggle_expanded(1, Side::Assistant).unwrap());
    assert!(!app.toggle_expanded(1, Side::Assistant).unwrap());
    assert_eq!(app.toggle_expanded(0, Side::User), Err(UiError::NoSuchPair(0)));
    assert_eq!(app.toggle_expanded(2, Side::User), Err(UiError::NoSuchPair(2)));
}

#[tokio::test]
async fn clear_and_export() {
    let mut app = ChatApp::new(StubGenerator::new(vec![Some("hello")]));
    app.submit("hi").await;

    assert!(app.toggle_export());
    let export = render::render_export(app.session());
    assert!(export.contains("Assistant: hello\n\nUser: hi"));

    app.clear();
    assert!(app.session().is_empty());
    assert!(!app.session().export_visible());
}
