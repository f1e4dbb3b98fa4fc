use crate::departments;
use sea_orm::prelude::{Date, Decimal, *};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub date_of_birth: Date,
    pub salary: Decimal,
    pub address: Option<String>,
    pub role: String,
    pub joining_date: Date,
    pub yearly_bonus_percentage: f64,
    #[sea_orm(indexed)]
    pub department_id: Option<i64>,
    pub reporting_manager_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "departments::Entity",
        from = "Column::DepartmentId",
        to = "departments::Column::Id"
    )]
    Department,
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ReportingManagerId",
        to = "Column::Id"
    )]
    ReportingManager,
}

impl Related<departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
