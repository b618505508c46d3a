use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Course, HoleInfo};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CourseResponse {
    pub course: Course,
    pub holes: Vec<HoleInfo>,
    pub total_par: i32,
    pub total_yardage: i32,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            course,
            holes: course.holes().to_vec(),
            total_par: course.total_par(),
            total_yardage: course.total_yardage(),
        }
    }
}
