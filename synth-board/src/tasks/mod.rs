pub mod terminal_task;
