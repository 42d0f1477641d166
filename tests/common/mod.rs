#![allow(dead_code)]

use tokio_util::sync::CancellationToken;
use tower_lsp::LanguageServer;
use tower_lsp::lsp_types::*;
use xmldoc_lsp::completion::provide_completions;
use xmldoc_lsp::{Backend, CompletionOutcome, CompletionTrigger};

pub fn create_test_backend() -> Backend {
    Backend::new_test()
}

/// Split `marked` at its `|` caret marker into (text, byte offset).
pub fn split_caret(marked: &str) -> (String, usize) {
    let offset = marked.find('|').expect("text should contain a `|` caret");
    (marked.replacen('|', "", 1), offset)
}

/// Run the completion boundary at the `|` marker of `marked`.
pub fn outcome_at(marked: &str, trigger: CompletionTrigger) -> CompletionOutcome {
    let (text, offset) = split_caret(marked);
    provide_completions(&text, offset, trigger, &CancellationToken::new())
}

/// Display texts of the candidates at the `|` marker, sorted.
pub fn labels_at(marked: &str, trigger: CompletionTrigger) -> Vec<String> {
    let mut labels: Vec<String> = outcome_at(marked, trigger)
        .candidates()
        .iter()
        .map(|candidate| candidate.display_text.clone())
        .collect();
    labels.sort();
    labels
}

pub async fn open_document(backend: &Backend, uri: &Url, text: &str) {
    backend
        .did_open(DidOpenTextDocumentParams {
            text_document: TextDocumentItem {
                uri: uri.clone(),
                language_id: "csharp".to_string(),
                version: 1,
                text: text.to_string(),
            },
        })
        .await;
}

/// Open a file and request completion at the given line/character.
///
/// `typed` sends the request as a trigger-character request for that
/// character; `None` sends an explicit invocation.
pub async fn complete_at(
    backend: &Backend,
    uri: &Url,
    text: &str,
    line: u32,
    character: u32,
    typed: Option<char>,
) -> Option<Vec<CompletionItem>> {
    open_document(backend, uri, text).await;

    let context = match typed {
        Some(ch) => CompletionContext {
            trigger_kind: CompletionTriggerKind::TRIGGER_CHARACTER,
            trigger_character: Some(ch.to_string()),
        },
        None => CompletionContext {
            trigger_kind: CompletionTriggerKind::INVOKED,
            trigger_character: None,
        },
    };

    let completion_params = CompletionParams {
        text_document_position: TextDocumentPositionParams {
            text_document: TextDocumentIdentifier { uri: uri.clone() },
            position: Position { line, character },
        },
        work_done_progress_params: WorkDoneProgressParams::default(),
        partial_result_params: PartialResultParams::default(),
        context: Some(context),
    };

    match backend.completion(completion_params).await.unwrap() {
        Some(CompletionResponse::Array(items)) => Some(items),
        Some(CompletionResponse::List(list)) => Some(list.items),
        None => None,
    }
}

pub fn item_labels(items: &[CompletionItem]) -> Vec<&str> {
    items.iter().map(|item| item.label.as_str()).collect()
}
