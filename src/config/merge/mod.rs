//! Source composition for [`GeneratorConfig`](super::GeneratorConfig).

pub mod service;
