pub mod content_handler;
