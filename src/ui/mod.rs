pub mod board;
pub mod reader;
pub mod windows;
