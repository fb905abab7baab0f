pub(crate) mod ast;
pub(crate) mod codegen;
pub(crate) mod converter;
pub(crate) mod metrics;
pub mod orchestrator;
pub(crate) mod strategy;

#[cfg(test)]
mod tests;
