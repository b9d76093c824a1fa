pub mod answers;
pub mod body;
pub mod questions;
pub mod root;
