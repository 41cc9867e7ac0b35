pub mod engine;
pub mod error;
pub mod output;
pub mod registry;
pub mod renderer;
pub mod storage;
pub mod template;
pub mod validation;
