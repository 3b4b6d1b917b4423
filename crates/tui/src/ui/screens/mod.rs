pub mod form;
pub mod login;
pub mod transactions;
