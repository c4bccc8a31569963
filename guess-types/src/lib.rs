pub mod flight;
pub mod messages;
pub mod response;
pub mod rules;

// Re-export all types
pub use flight::*;
pub use messages::*;
pub use response::*;
pub use rules::*;
