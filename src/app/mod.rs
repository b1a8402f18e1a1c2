// Application layer: the maintenance tasks and the HTML blocks they insert.

pub mod tasks;
pub mod templates;

pub use tasks::{execute, execute_all, TaskContext};
