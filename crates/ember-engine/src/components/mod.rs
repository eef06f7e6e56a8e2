pub mod particle;
pub mod pool;
