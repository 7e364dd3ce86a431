pub(crate) mod fixed_income;
pub(crate) mod health;
pub(crate) mod users;
