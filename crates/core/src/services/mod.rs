pub mod dashboard_service;
pub mod refresh;
pub mod session_service;
