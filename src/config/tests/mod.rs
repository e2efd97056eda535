//! Layout file and session tests

#[cfg(test)]
mod session_tests;
