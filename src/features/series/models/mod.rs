mod series;

pub use series::{NewSeries, Series, SeriesChanges};
