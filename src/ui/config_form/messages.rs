#[derive(Debug, Clone)]
pub enum ConfigFormMessage {
    PageReady,
    LevelChanged(String),
}
