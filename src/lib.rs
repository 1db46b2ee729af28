pub mod application;
pub mod classify;
pub mod fetch;
pub mod http;
pub mod package;
pub mod taxonomy;
pub mod text;
