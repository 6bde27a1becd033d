//! 预导入模块，方便使用

pub use super::lesson_students::{
    ActiveModel as LessonStudentActiveModel, Entity as LessonStudents,
    Model as LessonStudentModel,
};
pub use super::lesson_teachers::{
    ActiveModel as LessonTeacherActiveModel, Entity as LessonTeachers,
    Model as LessonTeacherModel,
};
pub use super::lessons::{ActiveModel as LessonActiveModel, Entity as Lessons, Model as LessonModel};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::teachers::{
    ActiveModel as TeacherActiveModel, Entity as Teachers, Model as TeacherModel,
};
