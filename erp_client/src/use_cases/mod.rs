pub mod fetch_api;
pub mod ui_logger;


pub use fetch_api::FetchApi;
pub use ui_logger::UiLogger;
