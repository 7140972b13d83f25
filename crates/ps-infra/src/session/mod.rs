mod store;

pub use store::{default_session_dir, SessionStore};
