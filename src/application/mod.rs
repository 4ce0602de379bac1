//! Application layer: the cache-aside protocol over the domain seams.

pub mod services;
