// src/ingest/providers/mod.rs
pub mod json_file;
pub mod news_rss;

pub use json_file::JsonFileProvider;
pub use news_rss::NewsRssProvider;
