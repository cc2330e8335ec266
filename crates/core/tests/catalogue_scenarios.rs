//! End-to-end catalogue flows through the public API.

use std::sync::Arc;

use catalogue::prelude::*;
use rust_decimal::Decimal;
use tempfile::TempDir;
use testresult::TestResult;

fn shoe_draft() -> ProductDraft {
    ProductDraft {
        name: "Shoe".to_string(),
        description: "Running shoe".to_string(),
        price: "10000".to_string(),
        stock: "5".to_string(),
        category: "Shoes".to_string(),
        image: None,
    }
}

#[tokio::test]
async fn sign_up_then_add_product_lists_it_under_the_seller() -> TestResult {
    let parts = CatalogueContext::in_memory(
        Arc::new(MemoryKeyValueStore::new()),
        SessionConfig::default(),
    );
    let ctx = parts.context;

    ctx.session.restore().await;
    ctx.session
        .sign_up(NewUser::new("Alice", "alice@x.com", "pw1"))
        .await?;

    let created = ctx.add_product(shoe_draft()).await?;

    let mine = ctx.products.list_products_by_seller("Alice").await;

    assert_eq!(mine, vec![created.clone()]);
    assert_eq!(created.seller, "Alice");
    assert_eq!(created.price, Decimal::from(10_000));
    assert_eq!(ctx.profile_stats().await?, 1);

    Ok(())
}

#[tokio::test]
async fn price_only_update_keeps_other_fields() -> TestResult {
    let parts = CatalogueContext::in_memory(
        Arc::new(MemoryKeyValueStore::new()),
        SessionConfig::default(),
    );
    let ctx = parts.context;

    ctx.session
        .sign_up(NewUser::new("Alice", "alice@x.com", "pw1"))
        .await?;
    let created = ctx.add_product(shoe_draft()).await?;

    let updated = ctx
        .products
        .update_product(
            created.uuid,
            ProductUpdate {
                price: Some(Decimal::from(8_000)),
                ..ProductUpdate::default()
            },
        )
        .await
        .ok_or("product should exist")?;

    assert_eq!(updated.price, Decimal::from(8_000));
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.stock, created.stock);
    assert_eq!(updated.category, created.category);
    assert_eq!(ctx.products.get_product(created.uuid).await, Some(updated));

    Ok(())
}

#[tokio::test]
async fn session_survives_restart_through_file_storage() -> TestResult {
    let dir = TempDir::new()?;
    let path = dir.path().join("session.json");

    let users = Arc::new(UsersRepository::default());

    let first = SessionStore::new(users.clone(), Arc::new(FileKeyValueStore::new(&path)));
    first.restore().await;
    let signed_up = first
        .sign_up(NewUser::new("Alice", "alice@x.com", "pw1"))
        .await?;

    let persisted = std::fs::read_to_string(&path)?;

    assert!(!persisted.contains("pw1"), "password persisted: {persisted}");

    let second = SessionStore::new(users, Arc::new(FileKeyValueStore::new(&path)));
    let restored = second.restore().await;

    assert_eq!(restored, signed_up);
    assert!(!restored.is_loading);

    second.sign_out().await?;

    let third = SessionStore::new(
        Arc::new(UsersRepository::default()),
        Arc::new(FileKeyValueStore::new(&path)),
    );

    assert_eq!(third.restore().await, Session::default());

    Ok(())
}

#[tokio::test]
async fn corrupt_session_file_restores_signed_out() -> TestResult {
    let dir = TempDir::new()?;
    let path = dir.path().join("session.json");
    std::fs::write(&path, "not json at all")?;

    let store = SessionStore::new(
        Arc::new(UsersRepository::default()),
        Arc::new(FileKeyValueStore::new(&path)),
    );

    assert_eq!(store.restore().await, Session::default());

    Ok(())
}

#[tokio::test]
async fn corrupt_session_file_still_allows_sign_in_and_out() -> TestResult {
    let dir = TempDir::new()?;
    let path = dir.path().join("session.json");
    std::fs::write(&path, "not json at all")?;

    let users = Arc::new(UsersRepository::default());
    users.insert(NewUser::new("Alice", "alice@x.com", "pw1")).await;

    let store = SessionStore::new(users.clone(), Arc::new(FileKeyValueStore::new(&path)));
    store.restore().await;

    let signed_in = store.sign_in("alice@x.com", "pw1").await?;

    assert_eq!(signed_in.user_name(), Some("Alice"));

    let restarted = SessionStore::new(users.clone(), Arc::new(FileKeyValueStore::new(&path)));

    assert_eq!(restarted.restore().await, signed_in);

    restarted.sign_out().await?;

    std::fs::write(&path, "{broken")?;

    let corrupt_again = SessionStore::new(users, Arc::new(FileKeyValueStore::new(&path)));

    assert_eq!(corrupt_again.sign_out().await?, Session::default());
    assert_eq!(corrupt_again.restore().await, Session::default());

    Ok(())
}

#[tokio::test]
async fn browse_applies_search_category_and_scope() -> TestResult {
    let parts = CatalogueContext::in_memory_with_ids(
        Arc::new(MemoryKeyValueStore::new()),
        SessionConfig::default(),
        Arc::new(SequentialIds::new()),
    );

    Fixture::from_yaml(
        r"
users:
  - { name: Alice, email: alice@x.com, password: pw1 }
products:
  - { name: Red Shoe, price: 10, category: Shoes, vendeur: Alice }
  - { name: Blue Hat, price: 5, category: Hats, vendeur: Bob }
",
    )?
    .load_into(&parts.users, &parts.products)
    .await?;

    let ctx = parts.context;
    ctx.session.sign_in("alice@x.com", "pw1").await?;

    let by_search = ctx
        .browse(&ProductFilter {
            search: "RED".to_string(),
            ..ProductFilter::default()
        })
        .await;
    let by_category = ctx
        .browse(&ProductFilter {
            category: Some("Hats".to_string()),
            ..ProductFilter::default()
        })
        .await;
    let mine = ctx
        .browse(&ProductFilter {
            scope: SellerScope::Mine,
            ..ProductFilter::default()
        })
        .await;

    let names = |products: &[Product]| -> Vec<String> {
        products.iter().map(|p| p.name.clone()).collect()
    };

    assert_eq!(names(&by_search), ["Red Shoe"]);
    assert_eq!(names(&by_category), ["Blue Hat"]);
    assert_eq!(names(&mine), ["Red Shoe"]);
    assert_eq!(
        categories(&ctx.products.list_products().await),
        ["Shoes", "Hats"]
    );

    Ok(())
}

#[tokio::test]
async fn renaming_a_user_leaves_old_attributions() -> TestResult {
    let parts = CatalogueContext::in_memory(
        Arc::new(MemoryKeyValueStore::new()),
        SessionConfig::default(),
    );
    let ctx = parts.context;

    let session = ctx
        .session
        .sign_up(NewUser::new("Alice", "alice@x.com", "pw1"))
        .await?;
    let created = ctx.add_product(shoe_draft()).await?;

    let mut profile = session.user_data.ok_or("should be signed in")?;
    profile.name = "Alicia".to_string();
    ctx.session.update_profile(profile).await?;

    assert_eq!(ctx.profile_stats().await?, 0);

    let result = ctx.remove_product(created.uuid).await;

    assert!(
        matches!(result, Err(CatalogueError::NotOwner)),
        "expected NotOwner after rename, got {result:?}"
    );

    Ok(())
}
