//! 预导入模块，方便使用

pub use super::approval_audits::{
    ActiveModel as ApprovalAuditActiveModel, Entity as ApprovalAudits,
    Model as ApprovalAuditModel,
};
pub use super::departments::{
    ActiveModel as DepartmentActiveModel, Entity as Departments, Model as DepartmentModel,
};
pub use super::faculty::{ActiveModel as FacultyActiveModel, Entity as Faculty, Model as FacultyModel};
pub use super::internship_faculty::{
    ActiveModel as InternshipFacultyActiveModel, Entity as InternshipFaculty,
};
pub use super::internship_students::{
    ActiveModel as InternshipStudentActiveModel, Entity as InternshipStudents,
};
pub use super::internships::{
    ActiveModel as InternshipActiveModel, Entity as Internships, Model as InternshipModel,
};
pub use super::students::{ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel};
pub use super::submissions::{
    ActiveModel as SubmissionActiveModel, Entity as Submissions, Model as SubmissionModel,
};
pub use super::task_students::{ActiveModel as TaskStudentActiveModel, Entity as TaskStudents};
pub use super::tasks::{ActiveModel as TaskActiveModel, Entity as Tasks, Model as TaskModel};
