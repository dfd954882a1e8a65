pub mod series_handler;
