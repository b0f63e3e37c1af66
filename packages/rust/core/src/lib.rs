//! Core pipeline orchestration for the tagging guide builder.
//!
//! This crate ties together source loading, section rendering, and document
//! assembly into end-to-end workflows (`build`, `check`).

pub mod assembler;
pub mod pipeline;
pub mod toc;
