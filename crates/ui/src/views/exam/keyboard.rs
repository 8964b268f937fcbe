use dioxus::prelude::Key;

use exam_core::ExamIntent;
use exam_core::model::OptionKey;

/// Shortcut for the question screen: letters select an option, arrows move.
pub(super) fn intent_for_key(key: &Key) -> Option<ExamIntent> {
    match key {
        Key::ArrowRight => Some(ExamIntent::Next),
        Key::ArrowLeft => Some(ExamIntent::Previous),
        Key::Character(text) => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => OptionKey::from_char(ch).map(ExamIntent::SelectOption),
                _ => None,
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_select_options_case_insensitively() {
        assert_eq!(
            intent_for_key(&Key::Character("b".into())),
            Some(ExamIntent::SelectOption(OptionKey::B))
        );
        assert_eq!(
            intent_for_key(&Key::Character("D".into())),
            Some(ExamIntent::SelectOption(OptionKey::D))
        );
        assert_eq!(intent_for_key(&Key::Character("e".into())), None);
        assert_eq!(intent_for_key(&Key::Character("ab".into())), None);
    }

    #[test]
    fn arrows_navigate() {
        assert_eq!(intent_for_key(&Key::ArrowRight), Some(ExamIntent::Next));
        assert_eq!(intent_for_key(&Key::ArrowLeft), Some(ExamIntent::Previous));
        assert_eq!(intent_for_key(&Key::Enter), None);
    }
}
