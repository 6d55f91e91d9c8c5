//! CLI command implementations.

pub(crate) mod generate;

pub(crate) use generate::GenerateArgs;
