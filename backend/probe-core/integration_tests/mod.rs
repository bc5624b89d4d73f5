mod error;
mod probe_tests;
