pub mod fixed_income_service;
pub mod user_service;

pub use fixed_income_service::FixedIncomeService;
pub use user_service::UserService;
