pub mod database;
pub mod fs;
pub mod paths;
pub mod texture;
