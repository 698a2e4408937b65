pub mod problem;
pub mod root;
