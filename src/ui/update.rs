use crate::dom::DomMutation;
use crate::ui::{messages::Message, task::Task};

/// What a handler wants done: document changes to apply right away and
/// follow-up work for the runtime.
#[derive(Debug)]
pub struct Update {
    pub mutations: Vec<DomMutation>,
    pub task: Task<Message>,
}

impl Update {
    pub fn none() -> Self {
        Self {
            mutations: Vec::new(),
            task: Task::none(),
        }
    }

    pub fn mutations(mutations: Vec<DomMutation>) -> Self {
        Self {
            mutations,
            task: Task::none(),
        }
    }

    pub fn task(task: Task<Message>) -> Self {
        Self {
            mutations: Vec::new(),
            task,
        }
    }

    pub fn with_task(mut self, task: Task<Message>) -> Self {
        self.task = Task::batch([self.task, task]);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty() && self.task.is_none()
    }
}
