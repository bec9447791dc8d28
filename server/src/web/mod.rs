pub mod app_state;
pub mod rate_limit;
pub mod rest_api;
pub mod router;
