//! Admin gate: the session decides which half of the API is reachable
//!
//! Guests get the menu, the cart and order tracking. Everything that edits
//! the menu, the floor plan or the kitchen flow requires a login first, and
//! a logout takes it away again.

use anyhow::Result;
use orderit_core::{AppError, Config, ErrorCode, OrderIt, RevenuePolicy};
use shared::models::{CategoryUpdate, OrderStatus, ProductUpdate};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn test_config(dir: &std::path::Path) -> Config {
    Config {
        data_dir: dir.to_path_buf(),
        seed_table_count: 3,
        vat_rate: 0.15,
        session_ttl_days: 7,
        revenue_policy: RevenuePolicy::OpenOrdersOnly,
    }
}

#[test]
fn every_admin_operation_is_gated() -> Result<()> {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let mut app = OrderIt::open_demo(test_config(dir.path()))?;

    let gate = |err: AppError| {
        assert_eq!(err.code, ErrorCode::NotAuthenticated);
    };

    gate(app.update_category("cat-1", CategoryUpdate::default()).unwrap_err());
    gate(app.delete_category("cat-1").unwrap_err());
    gate(app.update_product("prod-1", ProductUpdate::default()).unwrap_err());
    gate(app.delete_product("prod-1").unwrap_err());
    gate(app.toggle_table("table-1").unwrap_err());
    gate(app.delete_table("table-1").unwrap_err());
    gate(app.advance_order("ORD-1").unwrap_err());
    gate(app.set_order_status("ORD-1", OrderStatus::Ready).unwrap_err());

    // Nothing reached the stores
    assert_eq!(app.tables().tables().len(), 3);
    assert!(!dir.path().join("products.json").exists());
    Ok(())
}

#[tokio::test]
async fn wrong_password_never_opens_the_gate() -> Result<()> {
    init_tracing();
    let dir = tempfile::tempdir()?;

    {
        let mut app = OrderIt::open_demo(test_config(dir.path()))?;
        let err = app.login("admin@admin.com", "letmein").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCredentials);

        let err = app.login("root@admin.com", "admin123").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCredentials, "unknown email reads the same");

        assert!(!app.is_authenticated());
        assert_eq!(app.add_table(9).unwrap_err().code, ErrorCode::NotAuthenticated);
        assert!(!dir.path().join("session.json").exists());
    }

    // Failed attempts leave no trace to restore
    let app = OrderIt::open_demo(test_config(dir.path()))?;
    assert!(!app.is_authenticated());
    Ok(())
}

#[tokio::test]
async fn logout_closes_the_gate_and_clears_the_marker() -> Result<()> {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let mut app = OrderIt::open_demo(test_config(dir.path()))?;

    app.login("admin@admin.com", "admin123").await?;
    assert!(app.is_authenticated());
    app.add_table(9)?;
    assert!(dir.path().join("session.json").exists());

    app.logout()?;
    assert!(!app.is_authenticated());
    assert!(!dir.path().join("session.json").exists());
    assert_eq!(app.add_table(10).unwrap_err().code, ErrorCode::NotAuthenticated);

    // The table added while logged in stays
    assert!(app.tables().get_by_number(9).is_some());

    let app = OrderIt::open_demo(test_config(dir.path()))?;
    assert!(!app.is_authenticated(), "logout holds across a restart");
    Ok(())
}

#[tokio::test]
async fn relogin_after_logout_works() -> Result<()> {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let mut app = OrderIt::open_demo(test_config(dir.path()))?;

    app.login("admin@admin.com", "admin123").await?;
    app.logout()?;
    app.login("admin@admin.com", "admin123").await?;

    assert!(app.is_authenticated());
    app.add_table(7)?;
    assert!(app.tables().get_by_number(7).is_some());
    Ok(())
}
