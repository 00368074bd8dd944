pub mod pages;
pub mod visitors;
