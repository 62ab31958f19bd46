pub mod completions;
pub mod index;
pub mod scrape;
pub mod sync;
