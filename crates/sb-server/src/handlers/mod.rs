//! HTTP request handlers.

pub(crate) mod diagrams;
pub(crate) mod pages;
pub(crate) mod subjects;
