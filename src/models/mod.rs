pub mod reaction;
pub mod settings;
