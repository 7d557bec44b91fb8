pub mod alert;
pub mod visitor;
