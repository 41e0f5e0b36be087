use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, error, info};

use crate::commands::{self, CommandTable};
use crate::transport::Transport;
use crate::update::Update;

/// Terminal state of one dispatch invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The update text matched this registered trigger.
    Matched(&'static str),
    /// A text update with no matching trigger; the fallback reply was sent.
    Unmatched,
    /// A non-text update; acknowledged without a reply.
    Ignored,
    /// Dispatch failed and was absorbed by the fault boundary.
    Faulted,
}

impl DispatchOutcome {
    /// Short label for request-level logging.
    pub fn describe(&self) -> &'static str {
        match self {
            DispatchOutcome::Matched(trigger) => trigger,
            DispatchOutcome::Unmatched => "fallback",
            DispatchOutcome::Ignored => "ignored",
            DispatchOutcome::Faulted => "faulted",
        }
    }
}

/// Routes one update at a time to exactly one responder and delivers the
/// reply. Holds the immutable command table and the outbound transport;
/// shared across concurrent webhook requests without further locking.
pub struct Dispatcher {
    table: CommandTable,
    transport: Arc<dyn Transport>,
}

impl Dispatcher {
    pub fn new(table: CommandTable, transport: Arc<dyn Transport>) -> Self {
        Self { table, transport }
    }

    async fn dispatch(&self, update: &Update) -> Result<DispatchOutcome> {
        let Some((chat_id, text)) = update.text_message() else {
            debug!("Ignoring {} update {}", update.kind(), update.update_id);
            return Ok(DispatchOutcome::Ignored);
        };

        if let Some(entry) = self.table.lookup(text) {
            info!("Update {}: matched {}", update.update_id, entry.trigger);
            let reply = (entry.responder)(update)
                .with_context(|| format!("Responder for {} failed", entry.trigger))?;
            self.transport
                .send(chat_id, &reply)
                .await
                .with_context(|| format!("Failed to deliver {} reply", entry.trigger))?;
            Ok(DispatchOutcome::Matched(entry.trigger))
        } else {
            info!("Update {}: no matching trigger", update.update_id);
            let reply = commands::unrecognized(update).context("Fallback responder failed")?;
            self.transport
                .send(chat_id, &reply)
                .await
                .context("Failed to deliver fallback reply")?;
            Ok(DispatchOutcome::Unmatched)
        }
    }

    /// Fault boundary around [`dispatch`](Self::dispatch): any responder or
    /// delivery failure is logged with the update kind as context, answered
    /// with a single best-effort apology, and never propagated to the webhook
    /// layer. Failures are not retried.
    pub async fn dispatch_guarded(&self, update: &Update) -> DispatchOutcome {
        match self.dispatch(update).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Dispatch failed for {} update: {:#}", update.kind(), e);
                if let Some(chat_id) = update.chat_id() {
                    let apology = commands::apology();
                    if let Err(send_err) = self.transport.send(chat_id, &apology).await {
                        error!("Failed to send apology reply: {:#}", send_err);
                    }
                }
                DispatchOutcome::Faulted
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::commands::CommandEntry;
    use crate::formatter::{self, FormattedMessage};
    use crate::transport::mock::MockTransport;
    use crate::update::parse_update;
    use teloxide::types::ParseMode;

    fn text_update(text: &str) -> Update {
        parse_update(
            serde_json::json!({
                "update_id": 100,
                "message": {"message_id": 1, "chat": {"id": -42}, "text": text}
            })
            .to_string()
            .as_bytes(),
        )
        .unwrap()
    }

    fn dispatcher_with_mock() -> (Dispatcher, Arc<MockTransport>) {
        let mock = Arc::new(MockTransport::default());
        (Dispatcher::new(CommandTable::new(), mock.clone()), mock)
    }

    #[tokio::test]
    async fn test_matched_trigger_sends_one_reply() {
        let (dispatcher, mock) = dispatcher_with_mock();
        let outcome = dispatcher.dispatch_guarded(&text_update("/help")).await;

        assert_eq!(outcome, DispatchOutcome::Matched("/help"));
        let sent = mock.sent_messages();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].chat_id, -42);
        assert_eq!(sent[0].message.options.parse_mode, ParseMode::MarkdownV2);
        assert!(sent[0].message.options.disable_link_preview);
    }

    static FIRST_CALLS: AtomicUsize = AtomicUsize::new(0);
    static SECOND_CALLS: AtomicUsize = AtomicUsize::new(0);

    fn first_responder(_: &Update) -> anyhow::Result<FormattedMessage> {
        FIRST_CALLS.fetch_add(1, Ordering::SeqCst);
        Ok(formatter::render("first"))
    }

    fn second_responder(_: &Update) -> anyhow::Result<FormattedMessage> {
        SECOND_CALLS.fetch_add(1, Ordering::SeqCst);
        Ok(formatter::render("second"))
    }

    #[tokio::test]
    async fn test_exactly_one_responder_runs_per_update() {
        let table = CommandTable::from_entries(vec![
            CommandEntry {
                trigger: "/first",
                responder: first_responder,
            },
            CommandEntry {
                trigger: "/second",
                responder: second_responder,
            },
        ]);
        let mock = Arc::new(MockTransport::default());
        let dispatcher = Dispatcher::new(table, mock.clone());

        let outcome = dispatcher.dispatch_guarded(&text_update("/second")).await;

        assert_eq!(outcome, DispatchOutcome::Matched("/second"));
        assert_eq!(FIRST_CALLS.load(Ordering::SeqCst), 0);
        assert_eq!(SECOND_CALLS.load(Ordering::SeqCst), 1);
        assert_eq!(mock.sent_messages().len(), 1);
    }

    #[tokio::test]
    async fn test_unmatched_text_gets_the_fallback() {
        let (dispatcher, mock) = dispatcher_with_mock();
        let outcome = dispatcher.dispatch_guarded(&text_update("banana")).await;

        assert_eq!(outcome, DispatchOutcome::Unmatched);
        let sent = mock.sent_messages();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].message.body.contains("didn't understand"));
    }

    #[tokio::test]
    async fn test_matching_is_case_sensitive() {
        let (dispatcher, mock) = dispatcher_with_mock();
        let outcome = dispatcher.dispatch_guarded(&text_update("/HELP")).await;

        assert_eq!(outcome, DispatchOutcome::Unmatched);
        assert!(mock.sent_messages()[0].message.body.contains("didn't understand"));
    }

    #[tokio::test]
    async fn test_non_message_update_is_ignored() {
        let (dispatcher, mock) = dispatcher_with_mock();
        let update = parse_update(
            serde_json::json!({"update_id": 5, "callback_query": {"id": "x"}})
                .to_string()
                .as_bytes(),
        )
        .unwrap();

        let outcome = dispatcher.dispatch_guarded(&update).await;

        assert_eq!(outcome, DispatchOutcome::Ignored);
        assert!(mock.sent_messages().is_empty());
    }

    #[tokio::test]
    async fn test_message_without_text_is_ignored() {
        let (dispatcher, mock) = dispatcher_with_mock();
        let update = parse_update(
            serde_json::json!({
                "update_id": 6,
                "message": {"message_id": 2, "chat": {"id": 9}, "photo": []}
            })
            .to_string()
            .as_bytes(),
        )
        .unwrap();

        let outcome = dispatcher.dispatch_guarded(&update).await;

        assert_eq!(outcome, DispatchOutcome::Ignored);
        assert!(mock.sent_messages().is_empty());
    }

    fn failing_responder(_: &Update) -> anyhow::Result<FormattedMessage> {
        anyhow::bail!("copy generation broke")
    }

    #[tokio::test]
    async fn test_responder_failure_sends_one_apology() {
        let table = CommandTable::from_entries(vec![CommandEntry {
            trigger: "/start",
            responder: failing_responder,
        }]);
        let mock = Arc::new(MockTransport::default());
        let dispatcher = Dispatcher::new(table, mock.clone());

        let outcome = dispatcher.dispatch_guarded(&text_update("/start")).await;

        assert_eq!(outcome, DispatchOutcome::Faulted);
        let sent = mock.sent_messages();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].message.body.contains("unexpected error"));
    }

    #[tokio::test]
    async fn test_delivery_failure_is_absorbed() {
        let mock = Arc::new(MockTransport::failing());
        let dispatcher = Dispatcher::new(CommandTable::new(), mock.clone());

        let outcome = dispatcher.dispatch_guarded(&text_update("/help")).await;

        // Both the reply and the apology fail to send; neither escapes.
        assert_eq!(outcome, DispatchOutcome::Faulted);
        assert!(mock.sent_messages().is_empty());
    }
}
