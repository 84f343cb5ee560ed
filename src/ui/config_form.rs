pub mod handler;
pub mod messages;
pub mod state;

pub use handler::*;
pub use messages::*;
pub use state::*;
