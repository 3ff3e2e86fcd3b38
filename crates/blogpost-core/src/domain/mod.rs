//! Domain entities - the core business objects.

mod follow;
mod page;
mod post;
mod user;

pub use follow::Follow;
pub use page::{PageRequest, Paginated};
pub use post::Post;
pub use user::{User, validate_about_me, validate_username};
