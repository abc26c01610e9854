mod extract;
mod validate;

pub use extract::run_extract;
pub use validate::run_validate;
