//! HTTP request handlers.

pub mod create;
pub mod health;
pub mod redirect;

pub use create::create_short_url_handler;
pub use health::health_handler;
pub use redirect::redirect_handler;
