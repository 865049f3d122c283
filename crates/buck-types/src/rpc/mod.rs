pub mod block;
pub mod envelope;
