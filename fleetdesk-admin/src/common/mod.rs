pub mod messages;
pub mod task;
