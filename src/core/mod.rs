pub mod cleanup;
pub mod conclusion;
pub mod config;
pub mod context;
pub mod image;
pub mod mechanic;
pub mod parser;
pub mod sections;
pub mod text;
