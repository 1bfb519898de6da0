//! Message exchange: prompt construction and the send/list/clear flow.

pub mod prompt;
pub mod service;
