pub mod insights;
pub mod trip;

pub use insights::*;
pub use trip::*;
