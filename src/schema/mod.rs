pub mod encounter;
pub mod mechanic;
