pub mod calculators;
pub mod engine;
pub mod state;
pub mod status;

#[cfg(test)]
pub(crate) mod tests;
