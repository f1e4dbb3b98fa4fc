//! Employee resource: handlers and the business rules behind them.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{NaiveDate, Utc};
use entity::{departments, employees};
use platform_api::{ApiError, ApiResult};
use platform_db::DbPool;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use tracing::info;

use crate::{
    dto::{
        EmployeeCreateRequest, EmployeeDepartmentUpdateRequest, EmployeeListQuery,
        EmployeeResponse, EmployeeUpdateRequest, Lookup, PagedResponse,
    },
    http::AppState,
};

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<EmployeeCreateRequest>,
) -> ApiResult<(StatusCode, Json<EmployeeResponse>)> {
    let created = create_employee(&state.pool, req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<EmployeeListQuery>,
) -> ApiResult<Response> {
    let page = query.page.unwrap_or(0);
    let size = state.config.page_size(query.size);
    let (rows, total_elements, total_pages) = list_employees(&state.pool, page, size).await?;

    // Lookup mode degrades each entry to {id, name} for reference pickers.
    if query.lookup.unwrap_or(false) {
        let content: Vec<Lookup> = rows
            .into_iter()
            .map(|row| Lookup::new(row.id, row.name))
            .collect();
        let body = PagedResponse::new(content, page, size, total_elements, total_pages);
        return Ok(Json(body).into_response());
    }

    let content = to_responses(&state.pool, rows).await?;
    let body = PagedResponse::new(content, page, size, total_elements, total_pages);
    Ok(Json(body).into_response())
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<EmployeeResponse>> {
    Ok(Json(get_employee(&state.pool, id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<EmployeeUpdateRequest>,
) -> ApiResult<Json<EmployeeResponse>> {
    Ok(Json(update_employee(&state.pool, id, req).await?))
}

pub async fn update_department(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<EmployeeDepartmentUpdateRequest>,
) -> ApiResult<Json<EmployeeResponse>> {
    let updated = update_employee_department(&state.pool, id, req.new_department_id).await?;
    Ok(Json(updated))
}

pub async fn create_employee(
    db: &DbPool,
    req: EmployeeCreateRequest,
) -> ApiResult<EmployeeResponse> {
    validate_create(&req)?;
    let txn = db.begin().await?;

    let department = match req.department_id {
        Some(dept_id) => {
            let dept = departments::Entity::find_by_id(dept_id)
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    ApiError::not_found(format!("Department not found with ID: {dept_id}"))
                })?;
            Some(Lookup::new(dept.id, dept.name))
        }
        None => None,
    };
    let reporting_manager = match req.reporting_manager_id {
        Some(manager_id) => {
            let manager = employees::Entity::find_by_id(manager_id)
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    ApiError::not_found(format!("Reporting Manager not found with ID: {manager_id}"))
                })?;
            Some(Lookup::new(manager.id, manager.name))
        }
        None => None,
    };

    let model = employees::ActiveModel {
        id: NotSet,
        name: Set(req.name),
        date_of_birth: Set(req.date_of_birth),
        salary: Set(req.salary),
        address: Set(req.address),
        role: Set(req.role),
        joining_date: Set(req.joining_date),
        yearly_bonus_percentage: Set(req.yearly_bonus_percentage),
        department_id: Set(req.department_id),
        reporting_manager_id: Set(req.reporting_manager_id),
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    info!(employee_id = model.id, "employee created");
    Ok(EmployeeResponse::from_model(model, department, reporting_manager))
}

pub async fn list_employees(
    db: &DbPool,
    page: u64,
    size: u64,
) -> ApiResult<(Vec<employees::Model>, u64, u64)> {
    let paginator = employees::Entity::find()
        .order_by_asc(employees::Column::Id)
        .paginate(db, size);
    let totals = paginator.num_items_and_pages().await?;
    let rows = paginator.fetch_page(page).await?;
    Ok((rows, totals.number_of_items, totals.number_of_pages))
}

pub async fn get_employee(db: &DbPool, id: i64) -> ApiResult<EmployeeResponse> {
    let model = employees::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Employee not found with ID: {id}")))?;
    to_response(db, model).await
}

pub async fn update_employee(
    db: &DbPool,
    id: i64,
    req: EmployeeUpdateRequest,
) -> ApiResult<EmployeeResponse> {
    validate_update(id, &req)?;
    let txn = db.begin().await?;

    let existing = employees::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Employee not found with ID: {id}")))?;
    let mut active: employees::ActiveModel = existing.clone().into();

    if let Some(name) = req.name {
        active.name = Set(name);
    }
    if let Some(date_of_birth) = req.date_of_birth {
        active.date_of_birth = Set(date_of_birth);
    }
    if let Some(salary) = req.salary {
        active.salary = Set(salary);
    }
    if let Some(address) = req.address {
        active.address = Set(Some(address));
    }
    if let Some(role) = req.role {
        active.role = Set(role);
    }
    if let Some(joining_date) = req.joining_date {
        active.joining_date = Set(joining_date);
    }
    if let Some(bonus) = req.yearly_bonus_percentage {
        active.yearly_bonus_percentage = Set(bonus);
    }

    // Omitted, explicit null, and a fresh id are three distinct states here.
    match req.department_id {
        None => {}
        Some(None) => active.department_id = Set(None),
        Some(Some(dept_id)) => {
            departments::Entity::find_by_id(dept_id)
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    ApiError::not_found(format!("New department not found with ID: {dept_id}"))
                })?;
            active.department_id = Set(Some(dept_id));
        }
    }
    match req.reporting_manager_id {
        None => {}
        Some(None) => active.reporting_manager_id = Set(None),
        Some(Some(manager_id)) => {
            employees::Entity::find_by_id(manager_id)
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    ApiError::not_found(format!(
                        "New reporting manager not found with ID: {manager_id}"
                    ))
                })?;
            active.reporting_manager_id = Set(Some(manager_id));
        }
    }

    let updated = if active.is_changed() {
        active.update(&txn).await?
    } else {
        existing
    };
    txn.commit().await?;
    to_response(db, updated).await
}

pub async fn update_employee_department(
    db: &DbPool,
    id: i64,
    new_department_id: i64,
) -> ApiResult<EmployeeResponse> {
    let txn = db.begin().await?;

    let existing = employees::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Employee not found with ID: {id}")))?;
    departments::Entity::find_by_id(new_department_id)
        .one(&txn)
        .await?
        .ok_or_else(|| {
            ApiError::not_found(format!(
                "New department not found with ID: {new_department_id}"
            ))
        })?;

    let from_department = existing.department_id;
    let mut active: employees::ActiveModel = existing.into();
    active.department_id = Set(Some(new_department_id));
    let updated = active.update(&txn).await?;
    txn.commit().await?;

    info!(
        employee_id = id,
        ?from_department,
        to_department = new_department_id,
        "employee reassigned"
    );
    to_response(db, updated).await
}

/// Resolve the department and manager lookups for a single employee.
pub(crate) async fn to_response<C: ConnectionTrait>(
    db: &C,
    model: employees::Model,
) -> ApiResult<EmployeeResponse> {
    let department = match model.department_id {
        Some(dept_id) => departments::Entity::find_by_id(dept_id)
            .one(db)
            .await?
            .map(|dept| Lookup::new(dept.id, dept.name)),
        None => None,
    };
    let reporting_manager = match model.reporting_manager_id {
        Some(manager_id) => employees::Entity::find_by_id(manager_id)
            .one(db)
            .await?
            .map(|manager| Lookup::new(manager.id, manager.name)),
        None => None,
    };
    Ok(EmployeeResponse::from_model(
        model,
        department,
        reporting_manager,
    ))
}

/// Batch variant: resolves all referenced names in two queries.
pub(crate) async fn to_responses<C: ConnectionTrait>(
    db: &C,
    rows: Vec<employees::Model>,
) -> ApiResult<Vec<EmployeeResponse>> {
    let department_ids: Vec<i64> = rows.iter().filter_map(|row| row.department_id).collect();
    let manager_ids: Vec<i64> = rows
        .iter()
        .filter_map(|row| row.reporting_manager_id)
        .collect();

    let mut department_names: HashMap<i64, String> = HashMap::new();
    if !department_ids.is_empty() {
        for dept in departments::Entity::find()
            .filter(departments::Column::Id.is_in(department_ids))
            .all(db)
            .await?
        {
            department_names.insert(dept.id, dept.name);
        }
    }
    let mut manager_names: HashMap<i64, String> = HashMap::new();
    if !manager_ids.is_empty() {
        for manager in employees::Entity::find()
            .filter(employees::Column::Id.is_in(manager_ids))
            .all(db)
            .await?
        {
            manager_names.insert(manager.id, manager.name);
        }
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let department = row
                .department_id
                .and_then(|dept_id| {
                    department_names
                        .get(&dept_id)
                        .map(|name| Lookup::new(dept_id, name.clone()))
                });
            let reporting_manager = row
                .reporting_manager_id
                .and_then(|manager_id| {
                    manager_names
                        .get(&manager_id)
                        .map(|name| Lookup::new(manager_id, name.clone()))
                });
            EmployeeResponse::from_model(row, department, reporting_manager)
        })
        .collect())
}

fn validate_create(req: &EmployeeCreateRequest) -> ApiResult<()> {
    validate_name(&req.name)?;
    validate_role(&req.role)?;
    validate_salary(&req.salary)?;
    validate_date_of_birth(&req.date_of_birth)?;
    validate_joining_date(&req.joining_date)?;
    Ok(())
}

fn validate_update(id: i64, req: &EmployeeUpdateRequest) -> ApiResult<()> {
    if let Some(name) = &req.name {
        validate_name(name)?;
    }
    if let Some(role) = &req.role {
        validate_role(role)?;
    }
    if let Some(salary) = &req.salary {
        validate_salary(salary)?;
    }
    if let Some(date_of_birth) = &req.date_of_birth {
        validate_date_of_birth(date_of_birth)?;
    }
    if let Some(joining_date) = &req.joining_date {
        validate_joining_date(joining_date)?;
    }
    if req.reporting_manager_id == Some(Some(id)) {
        return Err(ApiError::validation(
            "An employee cannot be their own reporting manager.",
        ));
    }
    Ok(())
}

fn validate_name(name: &str) -> ApiResult<()> {
    if name.trim().is_empty() {
        return Err(ApiError::validation("Employee name is required"));
    }
    Ok(())
}

fn validate_role(role: &str) -> ApiResult<()> {
    if role.trim().is_empty() {
        return Err(ApiError::validation("Role/title is required"));
    }
    Ok(())
}

fn validate_salary(salary: &Decimal) -> ApiResult<()> {
    if *salary <= Decimal::ZERO {
        return Err(ApiError::validation("Salary must be greater than 0"));
    }
    Ok(())
}

fn validate_date_of_birth(date: &NaiveDate) -> ApiResult<()> {
    if *date > Utc::now().date_naive() {
        return Err(ApiError::validation("Date of birth cannot be in the future"));
    }
    Ok(())
}

fn validate_joining_date(date: &NaiveDate) -> ApiResult<()> {
    if *date > Utc::now().date_naive() {
        return Err(ApiError::validation("Joining date cannot be in the future"));
    }
    Ok(())
}
