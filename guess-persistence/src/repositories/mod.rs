pub mod ledger_repository;
pub mod session_repository;

pub use ledger_repository::{LedgerMode, LedgerRepository};
pub use session_repository::{SessionIdentity, SessionRepository};
