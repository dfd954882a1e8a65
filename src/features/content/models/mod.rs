mod content;

pub use content::{Content, ContentChanges, ContentStatus, NewContent};
