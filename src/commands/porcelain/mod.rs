pub mod cursor_log;
