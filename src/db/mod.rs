pub mod fixed_income_queries;
pub mod user_queries;
