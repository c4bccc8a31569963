pub mod reconciler;
pub mod validator;

// Re-export main components
pub use reconciler::*;
pub use validator::*;
