//! 课程实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "lessons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub date: chrono::NaiveDate,
    pub title: String,
    pub status: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::lesson_teachers::Entity")]
    LessonTeachers,
    #[sea_orm(has_many = "super::lesson_students::Entity")]
    LessonStudents,
}

impl Related<super::lesson_teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LessonTeachers.def()
    }
}

impl Related<super::lesson_students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LessonStudents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_lesson(self) -> crate::models::lessons::entities::Lesson {
        use crate::models::lessons::entities::Lesson;

        Lesson {
            id: self.id,
            title: self.title,
            date: self.date,
            status: self.status,
        }
    }
}
