use serde::Serialize;
use ts_rs::TS;

use crate::models::tasks::entities::Task;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/task.ts")]
pub struct CreateTaskResponse {
    pub task: Task,
    // 不属于该实习的学生，已被过滤掉
    pub rejected_students: Vec<i64>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/task.ts")]
pub struct TaskListResponse {
    pub items: Vec<Task>,
}
