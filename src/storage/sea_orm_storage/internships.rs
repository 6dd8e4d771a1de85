//! 实习存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::internship_faculty::{
    Column as InternshipFacultyColumn, Entity as InternshipFaculty,
};
use crate::entity::internship_students::{
    Column as InternshipStudentColumn, Entity as InternshipStudents,
};
use crate::entity::internships::{ActiveModel, Column, Entity as Internships};
use crate::errors::{PortalError, Result};
use crate::models::{
    PaginationInfo, PaginationQuery,
    internships::{
        entities::Internship,
        requests::{CreateInternshipRequest, InternshipListQuery},
        responses::InternshipListResponse,
    },
};
use crate::utils::contains_like;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建实习，初始为待审批状态
    pub async fn create_internship_impl(
        &self,
        created_by: i64,
        req: CreateInternshipRequest,
    ) -> Result<Internship> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            host_institution: Set(req.host_institution),
            category: Set(req.category),
            start_date: Set(req.start_date.format("%Y-%m-%d").to_string()),
            end_date: Set(req.end_date.format("%Y-%m-%d").to_string()),
            created_by: Set(created_by),
            is_approved: Set(false),
            version: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PortalError::from_db("创建实习失败", e))?;

        Ok(result.into_internship(Vec::new(), Vec::new()))
    }

    /// 通过 ID 获取实习，附带分配列表
    pub async fn get_internship_by_id_impl(&self, id: i64) -> Result<Option<Internship>> {
        let result = Internships::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询实习失败: {e}")))?;

        let Some(model) = result else {
            return Ok(None);
        };

        let students = self.list_assigned_students_impl(id).await?;
        let faculty = self.list_assigned_faculty_impl(id).await?;

        Ok(Some(model.into_internship(students, faculty)))
    }

    /// 分页列出实习
    pub async fn list_internships_with_pagination_impl(
        &self,
        query: InternshipListQuery,
    ) -> Result<InternshipListResponse> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let mut select = Internships::find();

        // 审批状态筛选
        if let Some(approved) = query.approved {
            select = select.filter(Column::IsApproved.eq(approved));
        }

        // 搜索条件（接收单位或类别）
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(
                Condition::any()
                    .add(Column::HostInstitution.like(contains_like(search.trim())))
                    .add(Column::Category.like(contains_like(search.trim()))),
            );
        }

        select = select.order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| PortalError::database_operation(format!("查询实习总数失败: {e}")))?;

        let internships = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询实习列表失败: {e}")))?;

        // 批量查询分配关系，避免逐条查询
        let internship_ids: Vec<i64> = internships.iter().map(|m| m.id).collect();
        let mut student_map: HashMap<i64, Vec<i64>> = HashMap::new();
        let mut faculty_map: HashMap<i64, Vec<i64>> = HashMap::new();

        if !internship_ids.is_empty() {
            let student_links = InternshipStudents::find()
                .filter(InternshipStudentColumn::InternshipId.is_in(internship_ids.clone()))
                .order_by_asc(InternshipStudentColumn::StudentId)
                .all(&self.db)
                .await
                .map_err(|e| {
                    PortalError::database_operation(format!("查询实习学生失败: {e}"))
                })?;
            for link in student_links {
                student_map
                    .entry(link.internship_id)
                    .or_default()
                    .push(link.student_id);
            }

            let faculty_links = InternshipFaculty::find()
                .filter(InternshipFacultyColumn::InternshipId.is_in(internship_ids))
                .order_by_asc(InternshipFacultyColumn::FacultyId)
                .all(&self.db)
                .await
                .map_err(|e| {
                    PortalError::database_operation(format!("查询实习教师失败: {e}"))
                })?;
            for link in faculty_links {
                faculty_map
                    .entry(link.internship_id)
                    .or_default()
                    .push(link.faculty_id);
            }
        }

        let items = internships
            .into_iter()
            .map(|m| {
                let students = student_map.remove(&m.id).unwrap_or_default();
                let faculty = faculty_map.remove(&m.id).unwrap_or_default();
                m.into_internship(students, faculty)
            })
            .collect();

        Ok(InternshipListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total),
        })
    }
}
