// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod config;
pub mod geometry;
pub mod reticle;
pub mod runtime;
pub mod session;
pub mod target;
pub mod trainer;
pub mod util;
