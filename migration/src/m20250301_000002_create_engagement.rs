use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_registry::{Faculty, Students};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 实习表
        manager
            .create_table(
                Table::create()
                    .table(Internships::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Internships::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Internships::HostInstitution)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Internships::Category).string().not_null())
                    .col(ColumnDef::new(Internships::StartDate).string().not_null())
                    .col(ColumnDef::new(Internships::EndDate).string().not_null())
                    .col(
                        ColumnDef::new(Internships::CreatedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Internships::IsApproved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Internships::Version)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Internships::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Internships::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 实习学生关联表
        manager
            .create_table(
                Table::create()
                    .table(InternshipStudents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InternshipStudents::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(InternshipStudents::InternshipId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InternshipStudents::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InternshipStudents::AssignedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(InternshipStudents::Table, InternshipStudents::InternshipId)
                            .to(Internships::Table, Internships::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(InternshipStudents::Table, InternshipStudents::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 实习教师关联表
        manager
            .create_table(
                Table::create()
                    .table(InternshipFaculty::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InternshipFaculty::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(InternshipFaculty::InternshipId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InternshipFaculty::FacultyId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InternshipFaculty::AssignedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(InternshipFaculty::Table, InternshipFaculty::InternshipId)
                            .to(Internships::Table, Internships::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(InternshipFaculty::Table, InternshipFaculty::FacultyId)
                            .to(Faculty::Table, Faculty::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 任务表（faculty / industry 两种来源共用）
        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tasks::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tasks::InternshipId).big_integer().not_null())
                    .col(ColumnDef::new(Tasks::Origin).string().not_null())
                    .col(ColumnDef::new(Tasks::IssuedBy).big_integer().not_null())
                    .col(ColumnDef::new(Tasks::Title).string().not_null())
                    .col(ColumnDef::new(Tasks::Description).text().not_null())
                    .col(ColumnDef::new(Tasks::Deadline).big_integer().not_null())
                    .col(ColumnDef::new(Tasks::Marks).double().not_null())
                    .col(ColumnDef::new(Tasks::Weightage).double().not_null())
                    .col(ColumnDef::new(Tasks::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Tasks::Table, Tasks::InternshipId)
                            .to(Internships::Table, Internships::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // 任务学生关联表
        manager
            .create_table(
                Table::create()
                    .table(TaskStudents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TaskStudents::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TaskStudents::TaskId).big_integer().not_null())
                    .col(
                        ColumnDef::new(TaskStudents::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TaskStudents::Table, TaskStudents::TaskId)
                            .to(Tasks::Table, Tasks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TaskStudents::Table, TaskStudents::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 提交表
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Submissions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Submissions::TaskId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Submissions::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Submissions::StudentName).string().not_null())
                    .col(ColumnDef::new(Submissions::FileRef).string().not_null())
                    .col(ColumnDef::new(Submissions::Grade).double().null())
                    .col(ColumnDef::new(Submissions::GradedBy).big_integer().null())
                    .col(
                        ColumnDef::new(Submissions::SubmittedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Submissions::GradedAt).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Submissions::Table, Submissions::TaskId)
                            .to(Tasks::Table, Tasks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Submissions::Table, Submissions::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 审批记录表
        manager
            .create_table(
                Table::create()
                    .table(ApprovalAudits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ApprovalAudits::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ApprovalAudits::InternshipId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ApprovalAudits::ActorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ApprovalAudits::ActorRole).string().not_null())
                    .col(
                        ColumnDef::new(ApprovalAudits::FromApproved)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ApprovalAudits::ToApproved)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ApprovalAudits::ChangedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ApprovalAudits::Table, ApprovalAudits::InternshipId)
                            .to(Internships::Table, Internships::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 唯一约束：分配关系与提交都按组合键去重
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_internship_students_pair")
                    .table(InternshipStudents::Table)
                    .col(InternshipStudents::InternshipId)
                    .col(InternshipStudents::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_internship_faculty_pair")
                    .table(InternshipFaculty::Table)
                    .col(InternshipFaculty::InternshipId)
                    .col(InternshipFaculty::FacultyId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_task_students_pair")
                    .table(TaskStudents::Table)
                    .col(TaskStudents::TaskId)
                    .col(TaskStudents::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_submissions_task_student")
                    .table(Submissions::Table)
                    .col(Submissions::TaskId)
                    .col(Submissions::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 普通索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tasks_internship_origin")
                    .table(Tasks::Table)
                    .col(Tasks::InternshipId)
                    .col(Tasks::Origin)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_task_students_student_id")
                    .table(TaskStudents::Table)
                    .col(TaskStudents::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_approval_audits_internship_id")
                    .table(ApprovalAudits::Table)
                    .col(ApprovalAudits::InternshipId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(ApprovalAudits::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Submissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TaskStudents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tasks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(InternshipFaculty::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(InternshipStudents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Internships::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Internships {
    #[sea_orm(iden = "internships")]
    Table,
    Id,
    HostInstitution,
    Category,
    StartDate,
    EndDate,
    CreatedBy,
    IsApproved,
    Version,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum InternshipStudents {
    #[sea_orm(iden = "internship_students")]
    Table,
    Id,
    InternshipId,
    StudentId,
    AssignedAt,
}

#[derive(DeriveIden)]
enum InternshipFaculty {
    #[sea_orm(iden = "internship_faculty")]
    Table,
    Id,
    InternshipId,
    FacultyId,
    AssignedAt,
}

#[derive(DeriveIden)]
enum Tasks {
    #[sea_orm(iden = "tasks")]
    Table,
    Id,
    InternshipId,
    Origin,
    IssuedBy,
    Title,
    Description,
    Deadline,
    Marks,
    Weightage,
    CreatedAt,
}

#[derive(DeriveIden)]
enum TaskStudents {
    #[sea_orm(iden = "task_students")]
    Table,
    Id,
    TaskId,
    StudentId,
}

#[derive(DeriveIden)]
enum Submissions {
    #[sea_orm(iden = "submissions")]
    Table,
    Id,
    TaskId,
    StudentId,
    StudentName,
    FileRef,
    Grade,
    GradedBy,
    SubmittedAt,
    GradedAt,
}

#[derive(DeriveIden)]
enum ApprovalAudits {
    #[sea_orm(iden = "approval_audits")]
    Table,
    Id,
    InternshipId,
    ActorId,
    ActorRole,
    FromApproved,
    ToApproved,
    ChangedAt,
}
