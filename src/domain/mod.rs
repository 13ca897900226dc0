pub mod document;
pub mod geometry;
pub mod item;
pub mod project;
pub mod vector;
