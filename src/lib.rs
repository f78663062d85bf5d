pub mod core;
pub mod domain;
pub mod schemas;
pub mod services;
pub mod store;

#[cfg(test)]
mod test_support;
