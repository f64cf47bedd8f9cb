pub mod precomputed;

pub use precomputed::PrecomputedLlmSource;
