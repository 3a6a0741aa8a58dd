mod root;
mod search;

pub use root::Cli;
