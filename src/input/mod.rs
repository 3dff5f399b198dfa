mod console;

pub use console::ConsoleInputSource;
