pub mod hooks;
pub mod pipeline;
