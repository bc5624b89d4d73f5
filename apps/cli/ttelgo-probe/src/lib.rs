pub mod cli;
pub mod error;
pub mod logger;
pub mod report;

#[cfg(test)]
mod tests;
