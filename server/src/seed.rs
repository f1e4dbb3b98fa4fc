//! Demo dataset: five departments plus a small management hierarchy.

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use entity::{departments, employees};
use platform_db::DbPool;
use rand::{Rng, distributions::Alphanumeric};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    EntityTrait, PaginatorTrait,
};
use tracing::info;

const GENERATED_EMPLOYEES: usize = 22;
const ROLES: [&str; 7] = [
    "Manager",
    "Senior Developer",
    "Junior Developer",
    "Analyst",
    "Associate",
    "Sales Rep",
    "Marketing Specialist",
];

/// Load the demo dataset. Skips entirely when any rows already exist.
pub async fn load_demo_data(db: &DbPool) -> Result<()> {
    let department_count = departments::Entity::find().count(db).await?;
    let employee_count = employees::Entity::find().count(db).await?;
    if department_count > 0 || employee_count > 0 {
        info!("database already contains data; skipping seed");
        return Ok(());
    }

    let hr = insert_department(db, "Human Resources", ymd(2020, 1, 15)?).await?;
    let engineering = insert_department(db, "Engineering", ymd(2019, 5, 20)?).await?;
    let sales = insert_department(db, "Sales", ymd(2021, 3, 10)?).await?;
    let marketing = insert_department(db, "Marketing", ymd(2022, 1, 1)?).await?;
    let finance = insert_department(db, "Finance", ymd(2018, 7, 25)?).await?;
    let department_ids = [hr.id, engineering.id, sales.id, marketing.id, finance.id];

    // Executives first so the generated staff has managers to report to.
    let ceo = insert_employee(
        db,
        NewEmployee {
            name: "Alice Smith".into(),
            date_of_birth: ymd(1980, 1, 1)?,
            salary: Decimal::new(200_000_00, 2),
            department_id: None,
            address: Some("123 Main St".into()),
            role: "CEO".into(),
            joining_date: ymd(2010, 1, 1)?,
            yearly_bonus_percentage: 10.0,
            reporting_manager_id: None,
        },
    )
    .await?;
    let cto = insert_employee(
        db,
        NewEmployee {
            name: "Bob Johnson".into(),
            date_of_birth: ymd(1982, 3, 10)?,
            salary: Decimal::new(180_000_00, 2),
            department_id: Some(engineering.id),
            address: Some("456 Oak Ave".into()),
            role: "CTO".into(),
            joining_date: ymd(2012, 6, 1)?,
            yearly_bonus_percentage: 9.0,
            reporting_manager_id: Some(ceo.id),
        },
    )
    .await?;
    let hr_director = insert_employee(
        db,
        NewEmployee {
            name: "Carol White".into(),
            date_of_birth: ymd(1978, 7, 5)?,
            salary: Decimal::new(150_000_00, 2),
            department_id: Some(hr.id),
            address: Some("789 Pine Ln".into()),
            role: "HR Director".into(),
            joining_date: ymd(2015, 2, 1)?,
            yearly_bonus_percentage: 8.0,
            reporting_manager_id: Some(ceo.id),
        },
    )
    .await?;

    set_department_head(db, hr, hr_director.id).await?;
    set_department_head(db, engineering, cto.id).await?;

    let mut rng = rand::thread_rng();
    let mut employee_ids = vec![ceo.id, cto.id, hr_director.id];
    for i in 0..GENERATED_EMPLOYEES {
        let street: String = (&mut rng)
            .sample_iter(Alphanumeric)
            .take(8)
            .map(char::from)
            .collect();
        let date_of_birth = ymd(
            1990 + rng.gen_range(0..10),
            rng.gen_range(1..=12),
            rng.gen_range(1..=28),
        )?;
        let joining_date = ymd(
            2020 + rng.gen_range(0..4),
            rng.gen_range(1..=12),
            rng.gen_range(1..=28),
        )?;
        // Managers are drawn from already-created employees, so a direct
        // self-reference cannot occur.
        let manager_id = employee_ids[rng.gen_range(0..employee_ids.len())];
        let department_id = department_ids[rng.gen_range(0..department_ids.len())];

        let employee = insert_employee(
            db,
            NewEmployee {
                name: format!("Employee {}", i + 1),
                date_of_birth,
                salary: Decimal::from(50_000 + rng.gen_range(0..100_000)),
                department_id: Some(department_id),
                address: Some(format!("{street} St")),
                role: ROLES[rng.gen_range(0..ROLES.len())].into(),
                joining_date,
                yearly_bonus_percentage: 2.0 + rng.r#gen::<f64>() * 8.0,
                reporting_manager_id: Some(manager_id),
            },
        )
        .await?;
        employee_ids.push(employee.id);
    }

    info!(
        employees = employee_ids.len(),
        departments = department_ids.len(),
        "initial data loaded"
    );
    Ok(())
}

struct NewEmployee {
    name: String,
    date_of_birth: NaiveDate,
    salary: Decimal,
    department_id: Option<i64>,
    address: Option<String>,
    role: String,
    joining_date: NaiveDate,
    yearly_bonus_percentage: f64,
    reporting_manager_id: Option<i64>,
}

async fn insert_department(
    db: &DbPool,
    name: &str,
    creation_date: NaiveDate,
) -> Result<departments::Model> {
    let model = departments::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        creation_date: Set(creation_date),
        head_employee_id: Set(None),
    }
    .insert(db)
    .await?;
    Ok(model)
}

async fn insert_employee(db: &DbPool, new: NewEmployee) -> Result<employees::Model> {
    let model = employees::ActiveModel {
        id: NotSet,
        name: Set(new.name),
        date_of_birth: Set(new.date_of_birth),
        salary: Set(new.salary),
        address: Set(new.address),
        role: Set(new.role),
        joining_date: Set(new.joining_date),
        yearly_bonus_percentage: Set(new.yearly_bonus_percentage),
        department_id: Set(new.department_id),
        reporting_manager_id: Set(new.reporting_manager_id),
    }
    .insert(db)
    .await?;
    Ok(model)
}

async fn set_department_head(
    db: &DbPool,
    department: departments::Model,
    head_id: i64,
) -> Result<()> {
    let mut active: departments::ActiveModel = department.into();
    active.head_employee_id = Set(Some(head_id));
    active.update(db).await?;
    Ok(())
}

fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| anyhow!("invalid date {year}-{month}-{day}"))
}
