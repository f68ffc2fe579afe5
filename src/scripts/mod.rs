mod exec;
mod loader;

pub use exec::*;
pub use loader::*;
