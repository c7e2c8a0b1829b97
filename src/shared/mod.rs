pub mod constants;
pub mod feed;
pub mod random;
#[cfg(test)]
pub mod test_helpers;
pub mod types;
pub mod validation;
