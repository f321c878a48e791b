pub mod color;
pub mod noise;
