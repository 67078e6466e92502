pub mod graph;
pub mod manifest;
pub mod material;
pub mod rebind;
pub mod template;
