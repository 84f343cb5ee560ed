use std::sync::Arc;

use futures_util::future::BoxFuture;
use futures_util::stream::FuturesUnordered;
use futures_util::{FutureExt, StreamExt};
use tracing::{debug, trace};

use crate::dom::{Document, EventKind, Selector};
use crate::models::AppConfig;
use crate::ui::config_form::{self, ConfigFormMessage, ConfigFormState, LOGGING_LEVEL_INPUT_ID};
use crate::ui::device_delete::{self, DeviceDeleteState};
use crate::ui::messages::Message;
use crate::ui::notifications::{self, NotificationState};
use crate::ui::task::Task;
use crate::utils::{ConfirmPrompt, DeviceApi};

/// One page session: the document, the configuration it was served with and
/// the state of every workflow running on it.
pub struct Console {
    document: Document,
    config: AppConfig,
    config_form: ConfigFormState,
    device_delete: DeviceDeleteState,
    notifications: NotificationState,
    api: Arc<dyn DeviceApi>,
    prompt: Box<dyn ConfirmPrompt>,
}

impl Console {
    pub fn new(
        document: Document,
        config: AppConfig,
        api: Arc<dyn DeviceApi>,
        prompt: Box<dyn ConfirmPrompt>,
    ) -> Self {
        Self {
            document,
            config,
            config_form: ConfigFormState::new(),
            device_delete: DeviceDeleteState::new(),
            notifications: NotificationState::new(),
            api,
            prompt,
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        trace!("Handling {:?}", message);

        let update = match message {
            Message::PageReady => config_form::handle_message(
                &mut self.config_form,
                &self.document,
                &self.config,
                ConfigFormMessage::PageReady,
            ),
            Message::ConfigForm(msg) => config_form::handle_message(
                &mut self.config_form,
                &self.document,
                &self.config,
                msg,
            ),
            Message::DeviceDelete(msg) => device_delete::handle_message(
                &mut self.device_delete,
                &self.api,
                self.prompt.as_ref(),
                msg,
            ),
            Message::Notification(msg) => {
                notifications::handle_message(&mut self.notifications, &self.document, msg)
            }
        };

        let requested = update.mutations.len();
        let applied = self.document.apply(update.mutations);
        if applied < requested {
            debug!("Applied {} of {} document mutations", applied, requested);
        }

        update.task
    }

    /// The user picks `level` in the logging level input. The change event
    /// only reaches the form if a listener was wired on page ready.
    pub fn select_logging_level(&mut self, level: &str) -> Task<Message> {
        let Some(input) = self
            .document
            .query_selector(&Selector::id(LOGGING_LEVEL_INPUT_ID))
        else {
            debug!("No logging level input to change");
            return Task::none();
        };

        self.document.set_value(input, level);
        if !self.document.has_listener(input, EventKind::Change) {
            return Task::none();
        }

        self.update(Message::ConfigForm(ConfigFormMessage::LevelChanged(
            level.to_string(),
        )))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn config_form(&self) -> &ConfigFormState {
        &self.config_form
    }

    pub fn device_delete(&self) -> &DeviceDeleteState {
        &self.device_delete
    }

    pub fn notifications(&self) -> &NotificationState {
        &self.notifications
    }
}

/// Single-threaded event loop: polls the tasks handlers return on the
/// current task and feeds their messages back into the [`Console`].
pub struct Runtime {
    console: Console,
    pending: FuturesUnordered<BoxFuture<'static, Option<Message>>>,
}

impl Runtime {
    pub fn new(console: Console) -> Self {
        Self {
            console,
            pending: FuturesUnordered::new(),
        }
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut Console {
        &mut self.console
    }

    pub fn dispatch(&mut self, message: impl Into<Message>) {
        let task = self.console.update(message.into());
        self.schedule(task);
    }

    pub fn schedule(&mut self, task: Task<Message>) {
        for future in task.into_futures() {
            self.pending.push(future);
        }
    }

    /// Tasks that have not produced their message yet.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Handles every message that is ready right now without waiting.
    /// Returns how many were handled.
    pub fn drain_ready(&mut self) -> usize {
        let mut handled = 0;
        while let Some(Some(output)) = self.pending.next().now_or_never() {
            if let Some(message) = output {
                self.dispatch(message);
                handled += 1;
            }
        }
        handled
    }

    /// Waits for the next task to finish and handles its message.
    /// Returns `false` once nothing is pending.
    pub async fn step(&mut self) -> bool {
        match self.pending.next().await {
            Some(Some(message)) => {
                self.dispatch(message);
                true
            }
            Some(None) => true,
            None => false,
        }
    }

    pub async fn run_until_idle(&mut self) {
        while self.step().await {}
    }

    pub fn into_console(self) -> Console {
        self.console
    }
}
