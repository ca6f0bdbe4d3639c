//! Domain data for the console: thread pools of JCA work managers and deployable content.

pub mod content;
pub mod thread_pool;

pub use content::*;
pub use thread_pool::*;
