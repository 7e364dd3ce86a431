mod asset_type;
mod fixed_income;
mod user;

pub use asset_type::AssetType;
pub use fixed_income::{CreateFixedIncome, FixedIncome, FixedIncomeQuery, FixedIncomeResponse};
pub use user::{CreateUser, User};
