//! HTTP handlers.

mod bookmarks;
mod health;
mod login;
mod messages;

pub use bookmarks::{add_bookmark, list_bookmarks, remove_bookmark};
pub use health::{health, root};
pub use login::login;
pub use messages::{create_message, delete_message, like_message, list_messages};
