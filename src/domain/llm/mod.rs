//! Advice provider abstraction over external LLM inference backends

mod provider;

pub use provider::AdviceProvider;

#[cfg(test)]
pub use provider::mock::MockAdviceProvider;
