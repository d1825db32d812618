//! HTTP front-end and CLI for Persian sentiment classification.

pub mod cli;
pub mod http;
