use axum::{Json, extract::Path};
use storage::{dto::course::CourseResponse, models::Course};

#[utoipa::path(
    get,
    path = "/api/courses/{course}",
    params(
        ("course" = Course, Path, description = "day1 or day2")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Par and yardage per hole", body = CourseResponse),
        (status = 400, description = "Unknown course"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "courses"
)]
pub async fn get_course(Path(course): Path<Course>) -> Json<CourseResponse> {
    Json(CourseResponse::from(course))
}
