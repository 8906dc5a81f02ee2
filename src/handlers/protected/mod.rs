pub mod journals;
pub mod monthlies;
pub mod utils;
