// Planning: catalog, rule-based assembly, remote generation and the fallback chain.

pub mod assembler;
pub mod boundary;
pub mod catalog;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod selector;
pub mod shopping;
pub mod sources;
