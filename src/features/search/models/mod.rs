mod search_document;

pub use search_document::SearchDocument;
