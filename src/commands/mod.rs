pub mod labels;
pub mod read;
pub mod send;
