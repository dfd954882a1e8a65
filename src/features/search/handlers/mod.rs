pub mod search_handler;
