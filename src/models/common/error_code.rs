// API 错误码，以整数写入响应体的 code 字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    InternalServerError = 1500,

    // 参数错误
    ValidationFailed = 2000,
    ParameterConflict = 2001,
    BodyEmpty = 2002,

    // 依赖（存储）错误
    DependencyFailed = 3000,

    // 课程
    LessonCreationFailed = 4000,
}
