// User profiles (trusted contact details) and master resumes, stored as files.

pub mod handlers;
pub mod store;
