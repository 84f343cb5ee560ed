pub const LOGGING_LEVEL_INPUT_ID: &str = "loggingLevel";
pub const UNSAVED_CHANGES_ID: &str = "unsavedChanges";

#[derive(Debug, Clone, Default)]
pub struct ConfigFormState {
    /// Set once the change listener is wired to the input.
    pub is_listening: bool,
    pub current_level: Option<String>,
    pub has_unsaved_changes: bool,
}

impl ConfigFormState {
    pub fn new() -> Self {
        Self::default()
    }
}
