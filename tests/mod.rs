
pub mod container;
pub mod forms;
pub mod macros;
pub mod validation;
