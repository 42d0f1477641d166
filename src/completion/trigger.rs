/// Typing-triggered completion.
///
/// Decides whether a typed character should open the completion list
/// inside a documentation comment.  Explicit invocation always completes;
/// this predicate only gates keystrokes.
use crate::types::CompletionTrigger;

pub(crate) fn is_identifier_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

pub(crate) fn is_identifier_part(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// The characters a client should report as trigger characters.
///
/// Markup characters first, then the ASCII identifier starts, so that typed
/// letters reach [`should_trigger`] instead of arriving as invocations.
pub fn trigger_characters() -> Vec<String> {
    ['<', '"', ' ']
        .into_iter()
        .chain('a'..='z')
        .chain('A'..='Z')
        .chain(['_'])
        .map(String::from)
        .collect()
}

/// Whether completion should open after the character just typed.
///
/// `position` is the byte offset of the caret, directly after the typed
/// character.  Completion opens:
///
/// - after `<` or `"`
/// - after a space that is followed by end of text or a character that
///   cannot start an identifier
/// - on the first letter of a new identifier, when
///   `trigger_on_typing_letters` is enabled
///
/// It never opens in the middle of an identifier.
pub fn should_trigger(
    text: &str,
    position: usize,
    trigger: CompletionTrigger,
    trigger_on_typing_letters: bool,
) -> bool {
    if !matches!(trigger, CompletionTrigger::Insertion(_)) || position < 1 {
        return false;
    }
    let Some(before) = text.get(..position) else {
        return false;
    };
    let after = &text[position..];

    let mut preceding = before.chars().rev();
    let Some(typed) = preceding.next() else {
        return false;
    };
    let next = after.chars().next();

    match typed {
        '<' | '"' => return true,
        ' ' if !next.is_some_and(is_identifier_start) => return true,
        _ => {}
    }

    if !is_identifier_start(typed) {
        return false;
    }

    // Only the first character of an identifier that is not being typed
    // into the middle of an existing word.
    let inside_word = preceding.next().is_some_and(is_identifier_part)
        || next.is_some_and(is_identifier_part);

    !inside_word && trigger_on_typing_letters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> bool {
        let ch = text.chars().last().unwrap();
        should_trigger(text, text.len(), CompletionTrigger::Insertion(ch), true)
    }

    #[test]
    fn opens_after_markup_characters() {
        assert!(typed("/// <"));
        assert!(typed("/// <code language=\""));
        assert!(typed("/// <code "));
    }

    #[test]
    fn space_before_identifier_does_not_open() {
        let text = "/// <code language";
        let position = "/// <code ".len();
        assert!(!should_trigger(text, position, CompletionTrigger::Insertion(' '), true));
    }

    #[test]
    fn first_letter_respects_preference() {
        assert!(typed("/// <c"));
        assert!(!should_trigger("/// <c", 6, CompletionTrigger::Insertion('c'), false));
        assert!(!typed("/// <co"));
    }

    #[test]
    fn trigger_characters_cover_identifier_starts() {
        let chars = trigger_characters();
        assert_eq!(&chars[..3], ["<", "\"", " "]);
        assert!(
            chars
                .iter()
                .skip(3)
                .all(|ch| ch.chars().all(is_identifier_start))
        );
        assert_eq!(chars.len(), 3 + 26 + 26 + 1);
    }

    #[test]
    fn never_for_invocation_or_start_of_text() {
        assert!(!should_trigger("<", 1, CompletionTrigger::Invoke, true));
        assert!(!should_trigger("<", 0, CompletionTrigger::Insertion('<'), true));
    }
}
