//! Paperboy - a feed-to-page news generator
//!
//! This crate turns a list of RSS/Atom feed URLs into a directory of static
//! HTML pages: one self-contained page per story plus a linked index.

pub mod blacklist;
pub mod config;
pub mod fetcher;
pub mod parser;
pub mod pipeline;
pub mod render;
pub mod slug;
