//! Department resource: handlers and business rules.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use entity::{departments, employees};
use platform_api::{ApiError, ApiResult};
use platform_db::DbPool;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use tracing::info;

use crate::{
    dto::{
        DepartmentCreateRequest, DepartmentListQuery, DepartmentResponse, DepartmentUpdateRequest,
        ExpandQuery, Lookup, PagedResponse,
    },
    http::AppState,
};

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<DepartmentCreateRequest>,
) -> ApiResult<(StatusCode, Json<DepartmentResponse>)> {
    let created = create_department(&state.pool, req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<DepartmentListQuery>,
) -> ApiResult<Json<PagedResponse<DepartmentResponse>>> {
    let page = query.page.unwrap_or(0);
    let size = state.config.page_size(query.size);
    let expand = query.expand.unwrap_or(false);
    let (content, total_elements, total_pages) =
        list_departments(&state.pool, page, size, expand).await?;
    Ok(Json(PagedResponse::new(
        content,
        page,
        size,
        total_elements,
        total_pages,
    )))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<ExpandQuery>,
) -> ApiResult<Json<DepartmentResponse>> {
    let expand = query.expand.unwrap_or(false);
    Ok(Json(get_department(&state.pool, id, expand).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<DepartmentUpdateRequest>,
) -> ApiResult<Json<DepartmentResponse>> {
    Ok(Json(update_department(&state.pool, id, req).await?))
}

pub async fn delete_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    delete_department(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn create_department(
    db: &DbPool,
    req: DepartmentCreateRequest,
) -> ApiResult<DepartmentResponse> {
    validate_name(&req.name)?;
    let txn = db.begin().await?;

    ensure_name_available(&txn, &req.name, None).await?;
    let department_head = resolve_head(&txn, req.department_head_id).await?;

    let model = departments::ActiveModel {
        id: NotSet,
        name: Set(req.name),
        creation_date: Set(req.creation_date),
        head_employee_id: Set(req.department_head_id),
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    info!(department_id = model.id, "department created");
    Ok(DepartmentResponse {
        id: model.id,
        name: model.name,
        creation_date: model.creation_date,
        department_head,
        employees: None,
    })
}

pub async fn list_departments(
    db: &DbPool,
    page: u64,
    size: u64,
    expand: bool,
) -> ApiResult<(Vec<DepartmentResponse>, u64, u64)> {
    let paginator = departments::Entity::find()
        .order_by_asc(departments::Column::Id)
        .paginate(db, size);
    let totals = paginator.num_items_and_pages().await?;
    let rows = paginator.fetch_page(page).await?;

    let mut content = Vec::with_capacity(rows.len());
    for row in rows {
        content.push(to_response(db, row, expand).await?);
    }
    Ok((content, totals.number_of_items, totals.number_of_pages))
}

pub async fn get_department(db: &DbPool, id: i64, expand: bool) -> ApiResult<DepartmentResponse> {
    let model = departments::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Department not found with ID: {id}")))?;
    to_response(db, model, expand).await
}

pub async fn update_department(
    db: &DbPool,
    id: i64,
    req: DepartmentUpdateRequest,
) -> ApiResult<DepartmentResponse> {
    validate_name(&req.name)?;
    let txn = db.begin().await?;

    let existing = departments::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Department not found with ID: {id}")))?;
    ensure_name_available(&txn, &req.name, Some(id)).await?;
    let department_head = resolve_head(&txn, req.department_head_id).await?;

    let mut active: departments::ActiveModel = existing.into();
    active.name = Set(req.name);
    active.creation_date = Set(req.creation_date);
    // Absent head id means "no head", not "leave unchanged".
    active.head_employee_id = Set(req.department_head_id);
    let updated = active.update(&txn).await?;
    txn.commit().await?;

    Ok(DepartmentResponse {
        id: updated.id,
        name: updated.name,
        creation_date: updated.creation_date,
        department_head,
        employees: None,
    })
}

pub async fn delete_department(db: &DbPool, id: i64) -> ApiResult<()> {
    let txn = db.begin().await?;

    let existing = departments::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Department not found with ID: {id}")))?;
    let member_count = employees::Entity::find()
        .filter(employees::Column::DepartmentId.eq(id))
        .count(&txn)
        .await?;
    if member_count > 0 {
        return Err(ApiError::validation(format!(
            "Cannot delete department as there are {member_count} employees assigned to it."
        )));
    }
    existing.delete(&txn).await?;
    txn.commit().await?;

    info!(department_id = id, "department deleted");
    Ok(())
}

/// The roster is derived from the reverse foreign key; members carry only the
/// {id, name} department lookup, which bounds the expansion to one level.
pub(crate) async fn to_response<C: ConnectionTrait>(
    db: &C,
    model: departments::Model,
    expand: bool,
) -> ApiResult<DepartmentResponse> {
    let department_head = match model.head_employee_id {
        Some(head_id) => employees::Entity::find_by_id(head_id)
            .one(db)
            .await?
            .map(|head| Lookup::new(head.id, head.name)),
        None => None,
    };
    let roster = if expand {
        let members = employees::Entity::find()
            .filter(employees::Column::DepartmentId.eq(model.id))
            .order_by_asc(employees::Column::Id)
            .all(db)
            .await?;
        Some(crate::employees::to_responses(db, members).await?)
    } else {
        None
    };
    Ok(DepartmentResponse {
        id: model.id,
        name: model.name,
        creation_date: model.creation_date,
        department_head,
        employees: roster,
    })
}

async fn ensure_name_available<C: ConnectionTrait>(
    db: &C,
    name: &str,
    exclude_id: Option<i64>,
) -> ApiResult<()> {
    let mut query = departments::Entity::find().filter(departments::Column::Name.eq(name));
    if let Some(id) = exclude_id {
        query = query.filter(departments::Column::Id.ne(id));
    }
    if query.count(db).await? > 0 {
        return Err(ApiError::validation(format!(
            "Department with name '{name}' already exists."
        )));
    }
    Ok(())
}

async fn resolve_head<C: ConnectionTrait>(
    db: &C,
    head_id: Option<i64>,
) -> ApiResult<Option<Lookup>> {
    match head_id {
        Some(id) => {
            let head = employees::Entity::find_by_id(id)
                .one(db)
                .await?
                .ok_or_else(|| ApiError::not_found(format!("Employee not found with ID: {id}")))?;
            Ok(Some(Lookup::new(head.id, head.name)))
        }
        None => Ok(None),
    }
}

fn validate_name(name: &str) -> ApiResult<()> {
    if name.trim().is_empty() {
        return Err(ApiError::validation("Department name is required"));
    }
    Ok(())
}
