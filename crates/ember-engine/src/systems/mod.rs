pub mod quality;
pub mod sim;
pub mod spawn;
