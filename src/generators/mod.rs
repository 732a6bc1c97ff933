//! Generator records: wind, gas and coal units with their daily samples.

/// Coal generator with heat-input data.
pub mod coal;
/// Gas (fossil) generator.
pub mod fossil;
pub mod types;
/// Wind generator.
pub mod wind;

// Re-export the main types for convenience
pub use coal::CoalGenerator;
pub use fossil::{Fossil, FossilsGenerator};
pub use types::{GenerationDay, Generation, Generator, Timestamp};
pub use wind::WindGenerator;
