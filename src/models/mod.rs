mod admin;
mod chat_session;
mod prescription;
mod test_result;
mod user;

pub use admin::Admin;
pub use chat_session::{ChatMessage, ChatSession};
pub use prescription::{Medicine, Prescription};
pub use test_result::TestResult;
pub use user::{PublicProfile, User};
