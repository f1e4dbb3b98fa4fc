use crate::employees;
use sea_orm::prelude::{Date, *};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "departments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub creation_date: Date,
    pub head_employee_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "employees::Entity")]
    Employees,
    #[sea_orm(
        belongs_to = "employees::Entity",
        from = "Column::HeadEmployeeId",
        to = "employees::Column::Id"
    )]
    Head,
}

impl Related<employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employees.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
