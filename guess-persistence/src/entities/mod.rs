pub mod ledgers;
pub mod session;

pub mod prelude {
    pub use super::ledgers::Entity as Ledgers;
    pub use super::session::Entity as Session;
}
