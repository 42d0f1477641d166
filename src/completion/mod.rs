/// Completion-related modules.
///
/// This sub-module groups all completion logic:
/// - **context**: Classifying the caret into an element-name, attribute-name
///   or attribute-value position
/// - **builder**: Turning registry entries into candidates, commit changes
///   and LSP `CompletionItem`s
/// - **trigger**: Deciding whether a typed character opens completion
/// - **handler**: The LSP completion request
///
/// [`provide_completions`] is the boundary the handler (and the tests) call:
/// it never fails, reporting cancellation and "nothing here" as distinct
/// outcomes.
pub mod builder;
pub mod context;
pub(crate) mod handler;
pub mod trigger;

use std::panic;

use tokio_util::sync::CancellationToken;

use crate::registry::registry;
use crate::syntax::SyntaxKind::DOC_COMMENT;
use crate::syntax::{DocComment, token_on_left_of_position};
use crate::types::{CompletionOutcome, CompletionTrigger};

/// Compute the candidates for byte `offset` of `source`.
///
/// Returns [`CompletionOutcome::Cancelled`] as soon as `cancel` fires, and
/// [`CompletionOutcome::NoCandidates`] outside attached `///` comments, for
/// unrecognised positions, and if resolution panics.
pub fn provide_completions(
    source: &str,
    offset: usize,
    trigger: CompletionTrigger,
    cancel: &CancellationToken,
) -> CompletionOutcome {
    if cancel.is_cancelled() {
        return CompletionOutcome::Cancelled;
    }

    catching_panics(offset, || collect_candidates(source, offset, trigger, cancel))
}

/// Run `compute`, turning a panic into [`CompletionOutcome::NoCandidates`].
fn catching_panics(
    offset: usize,
    compute: impl FnOnce() -> CompletionOutcome,
) -> CompletionOutcome {
    match panic::catch_unwind(panic::AssertUnwindSafe(compute)) {
        Ok(outcome) => outcome,
        Err(_) => {
            tracing::error!("XmlDocLSP: completion panicked at offset {offset}. Offering nothing.");
            CompletionOutcome::NoCandidates
        }
    }
}

fn collect_candidates(
    source: &str,
    offset: usize,
    trigger: CompletionTrigger,
    cancel: &CancellationToken,
) -> CompletionOutcome {
    let Some(comment) = DocComment::find(source, offset) else {
        return CompletionOutcome::NoCandidates;
    };
    if !comment.is_attached() {
        tracing::debug!("documentation comment is not attached to code");
        return CompletionOutcome::NoCandidates;
    }

    let Some(caret) = comment.tree_offset(offset) else {
        return CompletionOutcome::NoCandidates;
    };
    let Some(token) = token_on_left_of_position(comment.syntax(), caret) else {
        return CompletionOutcome::NoCandidates;
    };
    if !token.parent_ancestors().any(|node| node.kind() == DOC_COMMENT) {
        return CompletionOutcome::NoCandidates;
    }

    if cancel.is_cancelled() {
        return CompletionOutcome::Cancelled;
    }

    let context = context::resolve(&token, caret, trigger);
    tracing::debug!(?context, ?trigger, "resolved completion context");

    if cancel.is_cancelled() {
        return CompletionOutcome::Cancelled;
    }

    let candidates = builder::candidates_for(&context, registry());
    if candidates.is_empty() {
        CompletionOutcome::NoCandidates
    } else {
        CompletionOutcome::Candidates(candidates)
    }
}
