pub mod lessons;

pub use lessons::{configure_lessons_routes, not_found};
