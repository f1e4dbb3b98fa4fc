use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Departments {
    Table,
    Id,
    Name,
    CreationDate,
    HeadEmployeeId,
}

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
    Name,
    DateOfBirth,
    Salary,
    Address,
    Role,
    JoiningDate,
    YearlyBonusPercentage,
    DepartmentId,
    ReportingManagerId,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Departments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Departments::Name).string_len(256).not_null())
                    .col(ColumnDef::new(Departments::CreationDate).date().not_null())
                    // FK to employees is added below, once that table exists.
                    .col(ColumnDef::new(Departments::HeadEmployeeId).big_integer())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_departments_name")
                    .table(Departments::Table)
                    .col(Departments::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employees::Name).string_len(256).not_null())
                    .col(ColumnDef::new(Employees::DateOfBirth).date().not_null())
                    .col(
                        ColumnDef::new(Employees::Salary)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Employees::Address).string_len(512))
                    .col(ColumnDef::new(Employees::Role).string_len(128).not_null())
                    .col(ColumnDef::new(Employees::JoiningDate).date().not_null())
                    .col(
                        ColumnDef::new(Employees::YearlyBonusPercentage)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Employees::DepartmentId).big_integer())
                    .col(ColumnDef::new(Employees::ReportingManagerId).big_integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employees_department")
                            .from(Employees::Table, Employees::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employees_reporting_manager")
                            .from(Employees::Table, Employees::ReportingManagerId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_employees_department")
                    .table(Employees::Table)
                    .col(Employees::DepartmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_departments_head_employee")
                    .from(Departments::Table, Departments::HeadEmployeeId)
                    .to(Employees::Table, Employees::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name("fk_departments_head_employee")
                    .table(Departments::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await?;
        Ok(())
    }
}
