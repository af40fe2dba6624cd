//! Инфраструктурный слой вокруг движка: реализации RNG.

pub mod rng;

pub use rng::*;
