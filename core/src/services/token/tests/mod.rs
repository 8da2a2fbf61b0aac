//! Tests for the token service

#[cfg(test)]
mod keyring_tests;
