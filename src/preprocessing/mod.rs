/// Модуль подготовки данных

pub mod finance;
pub mod validation;

pub use finance::FinanceExtractor;
pub use validation::{validate_new_project, validate_update};
