use tracing::{debug, info};

use super::{ConfigFormMessage, ConfigFormState, LOGGING_LEVEL_INPUT_ID, UNSAVED_CHANGES_ID};
use crate::dom::{Display, Document, DomMutation, EventKind, Selector};
use crate::models::AppConfig;
use crate::ui::update::Update;

pub fn handle_message(
    state: &mut ConfigFormState,
    document: &Document,
    config: &AppConfig,
    message: ConfigFormMessage,
) -> Update {
    match message {
        ConfigFormMessage::PageReady => {
            let input = Selector::id(LOGGING_LEVEL_INPUT_ID);
            if document.query_selector(&input).is_none() {
                debug!("No {} input on this page, skipping form sync", input);
                return Update::none();
            }

            let level = config.effective_logging_level().to_string();
            info!("Logging level input set to {}", level);
            state.current_level = Some(level.clone());
            state.is_listening = true;

            Update::mutations(vec![
                DomMutation::SetValue {
                    target: input.clone(),
                    value: level,
                },
                DomMutation::Listen {
                    target: input,
                    event: EventKind::Change,
                },
            ])
        }

        ConfigFormMessage::LevelChanged(level) => {
            if !state.is_listening {
                debug!("Ignoring logging level change, no listener attached");
                return Update::none();
            }

            debug!("Logging level changed to {}", level);
            state.current_level = Some(level);
            state.has_unsaved_changes = true;

            Update::mutations(vec![DomMutation::SetDisplay {
                target: Selector::id(UNSAVED_CHANGES_ID),
                display: Display::Block,
            }])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::pages;

    fn ready(state: &mut ConfigFormState, doc: &mut Document, config: &AppConfig) {
        let update = handle_message(state, doc, config, ConfigFormMessage::PageReady);
        doc.apply(update.mutations);
    }

    fn input_value(doc: &Document) -> Option<String> {
        let input = doc.get_element_by_id(LOGGING_LEVEL_INPUT_ID)?;
        doc.element(input)?.value.clone()
    }

    fn indicator_visible(doc: &Document) -> bool {
        doc.get_element_by_id(UNSAVED_CHANGES_ID)
            .and_then(|node| doc.element(node))
            .is_some_and(|e| e.display.is_visible())
    }

    #[test]
    fn test_missing_level_defaults_to_info() {
        let mut doc = pages::config_page();
        let mut state = ConfigFormState::new();
        ready(&mut state, &mut doc, &AppConfig::default());

        assert_eq!(input_value(&doc).as_deref(), Some("INFO"));
        assert!(state.is_listening);
    }

    #[test]
    fn test_configured_level_is_shown() {
        let mut doc = pages::config_page();
        let mut state = ConfigFormState::new();
        ready(&mut state, &mut doc, &AppConfig::with_logging_level("DEBUG"));

        assert_eq!(input_value(&doc).as_deref(), Some("DEBUG"));
        assert_eq!(state.current_level.as_deref(), Some("DEBUG"));
    }

    #[test]
    fn test_change_reveals_unsaved_indicator() {
        let mut doc = pages::config_page();
        let mut state = ConfigFormState::new();
        ready(&mut state, &mut doc, &AppConfig::default());
        assert!(!indicator_visible(&doc), "hidden until the input changes");

        let input = doc.get_element_by_id(LOGGING_LEVEL_INPUT_ID).unwrap();
        assert!(doc.has_listener(input, EventKind::Change));

        let update = handle_message(
            &mut state,
            &doc,
            &AppConfig::default(),
            ConfigFormMessage::LevelChanged("ERROR".to_string()),
        );
        doc.apply(update.mutations);

        assert!(indicator_visible(&doc));
        assert!(state.has_unsaved_changes);
    }

    #[test]
    fn test_page_without_input_does_nothing() {
        let mut doc = pages::unknown_devices_page(&[]);
        let mut state = ConfigFormState::new();

        let update = handle_message(
            &mut state,
            &doc,
            &AppConfig::with_logging_level("DEBUG"),
            ConfigFormMessage::PageReady,
        );
        assert!(update.is_empty());
        assert_eq!(doc.apply(update.mutations), 0);

        // No listener was wired, so a stray change is ignored too.
        let update = handle_message(
            &mut state,
            &doc,
            &AppConfig::default(),
            ConfigFormMessage::LevelChanged("DEBUG".to_string()),
        );
        assert!(update.is_empty());
        assert!(!state.has_unsaved_changes);
    }
}
