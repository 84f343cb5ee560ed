// Public library interface for netureon-console
//
// Headless rendition of the Netureon web UI scripts: the logging level form
// sync, the unknown device delete workflow and the notification banners.

pub mod dom;
pub mod models;
pub mod ui;
pub mod utils;
