// Headless page model the UI workflows read from and describe changes to.

pub mod document;
pub mod mutation;
pub mod selector;

pub use document::*;
pub use mutation::*;
pub use selector::*;
