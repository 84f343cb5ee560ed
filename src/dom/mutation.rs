use tracing::debug;

use super::{Display, Document, Element, EventKind, Selector};

/// A description of one change to a [`Document`].
///
/// Handlers produce these instead of touching the document themselves; the
/// application applies them in order. Targets are resolved at apply time, so a
/// mutation whose target has disappeared in the meantime is skipped.
#[derive(Debug, Clone, PartialEq)]
pub enum DomMutation {
    SetValue { target: Selector, value: String },
    SetDisplay { target: Selector, display: Display },
    Listen { target: Selector, event: EventKind },
    Remove { target: Selector },
    Append { parent: Selector, element: Element },
}

impl DomMutation {
    pub fn target(&self) -> &Selector {
        match self {
            DomMutation::SetValue { target, .. }
            | DomMutation::SetDisplay { target, .. }
            | DomMutation::Listen { target, .. }
            | DomMutation::Remove { target } => target,
            DomMutation::Append { parent, .. } => parent,
        }
    }
}

impl Document {
    /// Applies `mutations` in order and returns how many took effect.
    pub fn apply(&mut self, mutations: impl IntoIterator<Item = DomMutation>) -> usize {
        let mut applied = 0;

        for mutation in mutations {
            let Some(node) = self.query_selector(mutation.target()) else {
                debug!("Skipping mutation, no element matches {}", mutation.target());
                continue;
            };

            let done = match mutation {
                DomMutation::SetValue { value, .. } => self.set_value(node, value),
                DomMutation::SetDisplay { display, .. } => match self.element_mut(node) {
                    Some(element) => {
                        element.display = display;
                        true
                    }
                    None => false,
                },
                DomMutation::Listen { event, .. } => self.add_event_listener(node, event),
                DomMutation::Remove { .. } => self.remove(node),
                DomMutation::Append { element, .. } => self.append_child(node, element).is_some(),
            };

            if done {
                applied += 1;
            }
        }

        applied
    }
}
