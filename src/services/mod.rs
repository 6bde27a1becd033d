pub mod lessons;

pub use lessons::LessonService;
