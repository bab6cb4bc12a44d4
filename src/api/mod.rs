pub mod client;
pub mod labels;
pub mod messages;
pub mod models;
pub mod projection;
