pub mod models;
pub mod pool;
pub mod queries;
pub mod timestamps;

#[cfg(test)]
pub mod test_support;
