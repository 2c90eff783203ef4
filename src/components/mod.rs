pub mod help;
pub mod shapes;
