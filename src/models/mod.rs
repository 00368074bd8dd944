pub mod visitor;

pub use visitor::{NewVisitor, Visitor};
