// Application submissions (document store) and the status dashboard
// (in-memory store with the admin approval workflow).

pub mod handlers;
pub mod repository;
pub mod store;
