#![allow(clippy::single_call_fn, reason = "HTTP handlers are called once from router")]

pub mod directory;
pub mod related;
pub mod search;
pub mod sitemap;
