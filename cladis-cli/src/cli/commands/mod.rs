pub mod check;
pub mod filter;
pub mod info;
pub mod tree;
