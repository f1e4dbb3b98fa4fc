//! Request and response shapes for the REST surface.
//!
//! Employee update fields use a double `Option` so an omitted key, an explicit
//! `null`, and a value stay distinguishable after deserialization; only the
//! department and reporting-manager references need the distinction.

use chrono::NaiveDate;
use entity::employees;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Minimal `{id, name}` projection used wherever embedding the full entity
/// would recurse (employee -> department -> head employee -> ...).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lookup {
    pub id: i64,
    pub name: String,
}

impl Lookup {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeCreateRequest {
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub salary: Decimal,
    #[serde(default)]
    pub department_id: Option<i64>,
    #[serde(default)]
    pub address: Option<String>,
    pub role: String,
    pub joining_date: NaiveDate,
    pub yearly_bonus_percentage: f64,
    #[serde(default)]
    pub reporting_manager_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdateRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub salary: Option<Decimal>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub joining_date: Option<NaiveDate>,
    #[serde(default)]
    pub yearly_bonus_percentage: Option<f64>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub department_id: Option<Option<i64>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub reporting_manager_id: Option<Option<i64>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDepartmentUpdateRequest {
    pub new_department_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentCreateRequest {
    pub name: String,
    pub creation_date: NaiveDate,
    #[serde(default)]
    pub department_head_id: Option<i64>,
}

/// Full-replace contract: name and creation date are required on every call,
/// and an absent head id clears the head reference.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentUpdateRequest {
    pub name: String,
    pub creation_date: NaiveDate,
    #[serde(default)]
    pub department_head_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct EmployeeListQuery {
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub lookup: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct DepartmentListQuery {
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub expand: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ExpandQuery {
    #[serde(default)]
    pub expand: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub id: i64,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub salary: Decimal,
    pub department: Option<Lookup>,
    pub address: Option<String>,
    pub role: String,
    pub joining_date: NaiveDate,
    pub yearly_bonus_percentage: f64,
    pub reporting_manager: Option<Lookup>,
}

impl EmployeeResponse {
    pub fn from_model(
        model: employees::Model,
        department: Option<Lookup>,
        reporting_manager: Option<Lookup>,
    ) -> Self {
        Self {
            id: model.id,
            name: model.name,
            date_of_birth: model.date_of_birth,
            salary: model.salary,
            department,
            address: model.address,
            role: model.role,
            joining_date: model.joining_date,
            yearly_bonus_percentage: model.yearly_bonus_percentage,
            reporting_manager,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentResponse {
    pub id: i64,
    pub name: String,
    pub creation_date: NaiveDate,
    pub department_head: Option<Lookup>,
    /// Present only when expansion was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employees: Option<Vec<EmployeeResponse>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    pub content: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub last: bool,
    pub first: bool,
}

impl<T> PagedResponse<T> {
    pub fn new(content: Vec<T>, page: u64, size: u64, total_elements: u64, total_pages: u64) -> Self {
        Self {
            content,
            page,
            size,
            total_elements,
            total_pages,
            last: page + 1 >= total_pages,
            first: page == 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_request_distinguishes_missing_null_and_value() {
        let missing: EmployeeUpdateRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(missing.department_id, None);
        assert_eq!(missing.reporting_manager_id, None);

        let cleared: EmployeeUpdateRequest =
            serde_json::from_value(json!({"departmentId": null, "reportingManagerId": null}))
                .unwrap();
        assert_eq!(cleared.department_id, Some(None));
        assert_eq!(cleared.reporting_manager_id, Some(None));

        let set: EmployeeUpdateRequest =
            serde_json::from_value(json!({"departmentId": 3, "reportingManagerId": 9})).unwrap();
        assert_eq!(set.department_id, Some(Some(3)));
        assert_eq!(set.reporting_manager_id, Some(Some(9)));
    }

    #[test]
    fn paged_response_flags() {
        let empty = PagedResponse::<i32>::new(Vec::new(), 0, 20, 0, 0);
        assert!(empty.first);
        assert!(empty.last);

        let middle = PagedResponse::new(vec![1, 2], 1, 2, 6, 3);
        assert!(!middle.first);
        assert!(!middle.last);

        let tail = PagedResponse::new(vec![5, 6], 2, 2, 6, 3);
        assert!(!tail.first);
        assert!(tail.last);
    }

    #[test]
    fn lookup_serializes_to_id_and_name_only() {
        let value = serde_json::to_value(Lookup::new(4, "Engineering")).unwrap();
        assert_eq!(value, json!({"id": 4, "name": "Engineering"}));
    }

    #[test]
    fn department_response_omits_roster_unless_expanded() {
        let plain = DepartmentResponse {
            id: 1,
            name: "QA".into(),
            creation_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            department_head: None,
            employees: None,
        };
        let value = serde_json::to_value(&plain).unwrap();
        assert!(value.get("employees").is_none());
        assert_eq!(value["departmentHead"], serde_json::Value::Null);
    }
}
