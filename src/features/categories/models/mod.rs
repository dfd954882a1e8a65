mod category;

pub use category::{Category, CategoryChanges, CategoryKind, CategoryStatistics, NewCategory};
