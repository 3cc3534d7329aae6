pub mod admins;
pub mod chat_sessions;
pub mod prescriptions;
pub mod test_results;
pub mod users;
