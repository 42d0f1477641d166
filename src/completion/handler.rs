/// Completion request orchestration.
///
/// This module contains the `handle_completion` method called by
/// `LanguageServer::completion`.  It maps the LSP request onto
/// [`provide_completions`], runs resolution on the blocking pool under a
/// cancellation token tied to the request, and converts the candidates to
/// `CompletionItem`s.
use tokio_util::sync::CancellationToken;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;

use crate::Backend;
use crate::completion::builder::to_completion_item;
use crate::completion::provide_completions;
use crate::completion::trigger::should_trigger;
use crate::types::{CompletionOutcome, CompletionTrigger};
use crate::util::position_to_offset;

/// How the client says the request was started.
///
/// Letters are registered as trigger characters, so a typed letter arrives
/// as a trigger-character request and becomes an insertion.  Everything
/// else is an invocation.
fn completion_trigger(context: Option<&CompletionContext>) -> CompletionTrigger {
    context
        .filter(|context| context.trigger_kind == CompletionTriggerKind::TRIGGER_CHARACTER)
        .and_then(|context| context.trigger_character.as_deref())
        .and_then(|typed| typed.chars().next())
        .map(CompletionTrigger::Insertion)
        .unwrap_or(CompletionTrigger::Invoke)
}

impl Backend {
    /// Main completion handler, called by `LanguageServer::completion`.
    ///
    /// Never returns an error: cancelled requests and positions without
    /// candidates both answer `None`.
    pub(crate) async fn handle_completion(
        &self,
        params: CompletionParams,
    ) -> Result<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;

        let Some(content) = self.document(&uri) else {
            return Ok(None);
        };

        let offset = position_to_offset(&content, position);
        let trigger = completion_trigger(params.context.as_ref());

        if matches!(trigger, CompletionTrigger::Insertion(_))
            && !should_trigger(
                &content,
                offset,
                trigger,
                self.config().trigger_on_typing_letters,
            )
        {
            return Ok(None);
        }

        // Dropping the request future (client cancellation) cancels the
        // resolution running on the blocking pool.
        let cancel = CancellationToken::new();
        let _guard = cancel.clone().drop_guard();

        let task = tokio::task::spawn_blocking(move || {
            match provide_completions(&content, offset, trigger, &cancel) {
                CompletionOutcome::Candidates(candidates) => {
                    let mut items: Vec<CompletionItem> = candidates
                        .iter()
                        .map(|candidate| to_completion_item(candidate, &content, offset))
                        .collect();
                    items.sort_by(|a, b| a.label.cmp(&b.label));
                    Some(items)
                }
                CompletionOutcome::NoCandidates | CompletionOutcome::Cancelled => None,
            }
        });

        match task.await {
            Ok(Some(items)) => Ok(Some(CompletionResponse::Array(items))),
            Ok(None) => Ok(None),
            Err(err) => {
                tracing::error!("XmlDocLSP: completion task failed: {err}");
                Ok(None)
            }
        }
    }
}
