pub mod age;
pub mod validation;
