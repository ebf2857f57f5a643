mod common;

use anyhow::Result;
use common::test_ledger;
use leave_ledger::seed::seed_employees;

fn names(employees: &[leave_ledger::model::employee::Employee]) -> Vec<&str> {
    employees.iter().map(|e| e.name.as_str()).collect()
}

#[actix_web::test]
async fn bad_entries_do_not_block_the_rest_of_the_roster() -> Result<()> {
    let t = test_ledger().await?;
    let roster = t.dir().join("roster.json");
    std::fs::write(
        &roster,
        r#"[
            {"name": "Asha", "email": "asha@example.com", "entitlement": 24, "balance": 24},
            {"name": "Asha", "email": "asha2@example.com"},
            {"name": "   ", "email": "blank@example.com"},
            {"name": "Ben", "email": "ben@example.com", "entitlement": 12, "balance": 10}
        ]"#,
    )?;

    assert_eq!(seed_employees(&t.ledger, &roster).await?, 2);

    let employees = t.ledger.employees().await?;
    assert_eq!(names(&employees), ["Asha", "Ben"]);
    assert_eq!(employees[0].balance, 24.0);
    assert_eq!(employees[1].entitlement, 12.0);
    Ok(())
}

#[actix_web::test]
async fn seeding_twice_leaves_existing_rows_alone() -> Result<()> {
    let t = test_ledger().await?;
    let roster = t.dir().join("roster.json");
    std::fs::write(
        &roster,
        r#"[{"name": "Asha", "email": "asha@example.com", "entitlement": 24, "balance": 24}]"#,
    )?;

    assert_eq!(seed_employees(&t.ledger, &roster).await?, 1);
    let asha = t.ledger.employees().await?[0].id;
    t.ledger.set_balance(asha, 3.0).await?;

    assert_eq!(seed_employees(&t.ledger, &roster).await?, 0);
    assert_eq!(t.ledger.balance(asha).await?, 3.0);
    assert_eq!(t.ledger.employees().await?.len(), 1);
    Ok(())
}

#[actix_web::test]
async fn missing_roster_file_is_an_error() -> Result<()> {
    let t = test_ledger().await?;
    assert!(seed_employees(&t.ledger, t.dir().join("absent.json")).await.is_err());
    Ok(())
}
