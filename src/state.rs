use crate::services::{FixedIncomeService, UserService};

#[derive(Clone)]
pub struct AppState {
    pub fixed_income: FixedIncomeService,
    pub users: UserService,
}
