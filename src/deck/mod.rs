//! Deck assembly and the end-to-end generation run.

pub mod assemble;
pub mod pipeline;
