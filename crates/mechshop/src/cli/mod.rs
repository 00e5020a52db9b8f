pub mod menu;
pub mod output;
pub mod prompt;

pub use menu::{Menu, MenuChoice};
pub use output::{OutputFormat, OutputWriter};
pub use prompt::Prompter;
