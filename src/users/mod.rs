use uuid::Uuid;

pub type UserId = Uuid;

pub mod password;
pub mod store;

pub use store::User;
