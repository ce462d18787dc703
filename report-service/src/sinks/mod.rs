pub mod console;
pub mod text_file;

pub use console::ConsoleSink;
pub use text_file::TextFileSink;
