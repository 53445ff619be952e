//! End-to-end service flows against an in-memory database.

use chrono::Utc;

use rigforge_core::{LineItem, Requester, Role, User};
use rigforge_db::repository::generate_id;
use rigforge_db::{Database, DbConfig, UserFilter};
use rigforge_service::services::catalog_service::{
    CategoryChanges, CategoryDraft, ComponentDraft, PartnerDraft, PartnerPriceDraft,
};
use rigforge_service::services::configuration_service::{
    ConfigurationChanges, ConfigurationDraft,
};
use rigforge_service::services::user_service::UserChanges;
use rigforge_service::{
    CatalogService, ConfigurationService, ServiceError, UserService,
};

struct Harness {
    db: Database,
    configurations: ConfigurationService,
    catalog: CatalogService,
    users: UserService,
    admin: Requester,
    alice: Requester,
    bob: Requester,
}

async fn harness() -> Harness {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();

    let admin = seed_user(&db, "Admin", "admin@example.com", Role::Admin).await;
    let alice = seed_user(&db, "Alice", "alice@example.com", Role::User).await;
    let bob = seed_user(&db, "Bob", "bob@example.com", Role::User).await;

    Harness {
        configurations: ConfigurationService::new(db.clone()),
        catalog: CatalogService::new(db.clone()),
        users: UserService::new(db.clone()),
        db,
        admin,
        alice,
        bob,
    }
}

async fn seed_user(db: &Database, name: &str, email: &str, role: Role) -> Requester {
    let now = Utc::now();
    let user = User {
        id: generate_id(),
        name: name.to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$stub".to_string(),
        role,
        configuration_ids: vec![],
        created_at: now,
        updated_at: now,
    };
    db.users().insert(&user).await.unwrap();
    Requester::new(user.id, role)
}

/// Creates a category and a component priced 599.99 EUR, returning the
/// component id.
async fn seed_component(h: &Harness) -> String {
    let category = h
        .catalog
        .create_category(
            &h.admin,
            CategoryDraft {
                name: "Processeur (CPU)".to_string(),
                description: None,
                icon: None,
            },
        )
        .await
        .unwrap();

    h.catalog
        .create_component(
            &h.admin,
            ComponentDraft {
                category_id: category.id,
                brand: "Intel".to_string(),
                title: "Intel Core i9-13900K".to_string(),
                model: "i9-13900K".to_string(),
                description: None,
                specifications: vec![],
                image: None,
                base_price_cents: 59999,
            },
        )
        .await
        .unwrap()
        .id
}

fn draft(name: &str, items: Vec<LineItem>) -> ConfigurationDraft {
    ConfigurationDraft {
        name: name.to_string(),
        description: None,
        components: items,
        is_public: false,
        tags: vec![],
    }
}

fn item(component_id: &str, price_cents: i64, quantity: i64) -> LineItem {
    LineItem {
        component_id: component_id.to_string(),
        selected_partner_id: None,
        price_cents,
        quantity,
    }
}

#[tokio::test]
async fn total_is_sum_of_price_times_quantity() {
    let h = harness().await;
    let comp = seed_component(&h).await;

    let single = h
        .configurations
        .create(&h.alice, draft("Single", vec![item(&comp, 59999, 1)]))
        .await
        .unwrap();
    assert_eq!(single.total_cost_cents, 59999);

    let double = h
        .configurations
        .create(&h.alice, draft("Double", vec![item(&comp, 59999, 2)]))
        .await
        .unwrap();
    assert_eq!(double.total_cost_cents, 119998);
}

#[tokio::test]
async fn empty_line_items_rejected() {
    let h = harness().await;

    let err = h
        .configurations
        .create(&h.alice, draft("Empty", vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn unknown_component_rejects_whole_draft() {
    let h = harness().await;
    let comp = seed_component(&h).await;

    let err = h
        .configurations
        .create(
            &h.alice,
            draft(
                "Mixed",
                vec![item(&comp, 59999, 1), item("no-such-component", 100, 1)],
            ),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Referential { entity: "Component", .. }));

    // Nothing persisted, back-reference untouched
    assert!(h
        .configurations
        .list_for_user(&h.alice, &h.alice.id)
        .await
        .unwrap()
        .is_empty());
    let owner = h.db.users().get_by_id(&h.alice.id).await.unwrap().unwrap();
    assert!(owner.configuration_ids.is_empty());
}

#[tokio::test]
async fn unknown_selected_partner_rejected() {
    let h = harness().await;
    let comp = seed_component(&h).await;

    let mut line = item(&comp, 59999, 1);
    line.selected_partner_id = Some("no-such-partner".to_string());

    let err = h
        .configurations
        .create(&h.alice, draft("Bad partner", vec![line]))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Referential { entity: "Partner", .. }));
}

#[tokio::test]
async fn ownership_isolation_with_admin_override() {
    let h = harness().await;
    let comp = seed_component(&h).await;

    let cfg = h
        .configurations
        .create(&h.alice, draft("Mine", vec![item(&comp, 59999, 1)]))
        .await
        .unwrap();

    // Foreign user: denied, but existence is not hidden
    let err = h.configurations.get(&cfg.id, &h.bob).await.unwrap_err();
    assert!(matches!(err, ServiceError::Authorization(_)));
    let err = h
        .configurations
        .update(&cfg.id, &h.bob, ConfigurationChanges::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Authorization(_)));
    let err = h.configurations.delete(&cfg.id, &h.bob).await.unwrap_err();
    assert!(matches!(err, ServiceError::Authorization(_)));

    // Unknown id stays NotFound even for foreign requesters
    let err = h.configurations.get("missing", &h.bob).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { .. }));

    // Admin override
    let fetched = h.configurations.get(&cfg.id, &h.admin).await.unwrap();
    assert_eq!(fetched.id, cfg.id);
    h.configurations.delete(&cfg.id, &h.admin).await.unwrap();
}

#[tokio::test]
async fn concurrent_creates_keep_every_back_reference() {
    let h = harness().await;
    let comp = seed_component(&h).await;

    let (first, second) = tokio::join!(
        h.configurations
            .create(&h.alice, draft("First", vec![item(&comp, 100, 1)])),
        h.configurations
            .create(&h.alice, draft("Second", vec![item(&comp, 200, 1)])),
    );
    let first = first.unwrap();
    let second = second.unwrap();

    let owner = h.db.users().get_by_id(&h.alice.id).await.unwrap().unwrap();
    assert_eq!(owner.configuration_ids.len(), 2);
    assert!(owner.configuration_ids.contains(&first.id));
    assert!(owner.configuration_ids.contains(&second.id));
}

#[tokio::test]
async fn back_references_stay_symmetric() {
    let h = harness().await;
    let comp = seed_component(&h).await;

    let cfg = h
        .configurations
        .create(&h.alice, draft("Tracked", vec![item(&comp, 59999, 1)]))
        .await
        .unwrap();

    let owner = h.db.users().get_by_id(&h.alice.id).await.unwrap().unwrap();
    assert_eq!(owner.configuration_ids, vec![cfg.id.clone()]);

    h.configurations.delete(&cfg.id, &h.alice).await.unwrap();

    let owner = h.db.users().get_by_id(&h.alice.id).await.unwrap().unwrap();
    assert!(owner.configuration_ids.is_empty());
}

#[tokio::test]
async fn component_change_recomputes_total() {
    let h = harness().await;
    let comp = seed_component(&h).await;

    let cfg = h
        .configurations
        .create(&h.alice, draft("Evolving", vec![item(&comp, 59999, 1)]))
        .await
        .unwrap();

    let updated = h
        .configurations
        .update(
            &cfg.id,
            &h.alice,
            ConfigurationChanges {
                components: Some(vec![item(&comp, 59999, 2)]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.total_cost_cents, 119998);

    // A rename alone leaves the total untouched
    let renamed = h
        .configurations
        .update(
            &cfg.id,
            &h.alice,
            ConfigurationChanges {
                name: Some("Renamed".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Renamed");
    assert_eq!(renamed.total_cost_cents, 119998);
}

#[tokio::test]
async fn list_all_is_admin_only() {
    let h = harness().await;
    let comp = seed_component(&h).await;

    h.configurations
        .create(&h.alice, draft("A", vec![item(&comp, 100, 1)]))
        .await
        .unwrap();
    h.configurations
        .create(&h.bob, draft("B", vec![item(&comp, 200, 1)]))
        .await
        .unwrap();

    let err = h
        .configurations
        .list_all(&h.alice, None, 20, 0)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Authorization(_)));

    let all = h.configurations.list_all(&h.admin, None, 20, 0).await.unwrap();
    assert_eq!(all.len(), 2);

    let only_alice = h
        .configurations
        .list_all(&h.admin, Some(&h.alice.id), 20, 0)
        .await
        .unwrap();
    assert_eq!(only_alice.len(), 1);
    assert_eq!(only_alice[0].name, "A");
}

#[tokio::test]
async fn price_breakdown_matches_lines() {
    let h = harness().await;
    let comp = seed_component(&h).await;

    let cfg = h
        .configurations
        .create(&h.alice, draft("Billed", vec![item(&comp, 59999, 2)]))
        .await
        .unwrap();

    let breakdown = h
        .configurations
        .price_breakdown(&cfg.id, &h.alice)
        .await
        .unwrap();
    assert_eq!(breakdown.lines.len(), 1);
    assert_eq!(breakdown.lines[0].title, "Intel Core i9-13900K");
    assert_eq!(breakdown.lines[0].subtotal.cents(), 119998);
    assert_eq!(breakdown.total.cents(), 119998);
}

#[tokio::test]
async fn populated_view_resolves_names() {
    let h = harness().await;
    let comp = seed_component(&h).await;

    let partner = h
        .catalog
        .create_partner(
            &h.admin,
            PartnerDraft {
                name: "LDLC".to_string(),
                website: "https://www.ldlc.com".to_string(),
                logo: None,
                affiliate: Default::default(),
                contact_email: None,
            },
        )
        .await
        .unwrap();

    let mut line = item(&comp, 59999, 1);
    line.selected_partner_id = Some(partner.id.clone());
    let cfg = h
        .configurations
        .create(&h.alice, draft("Readable", vec![line]))
        .await
        .unwrap();

    let view = h.configurations.populate(&cfg.id, &h.alice).await.unwrap();
    assert_eq!(view.owner_name, "Alice");
    assert_eq!(view.lines.len(), 1);
    assert_eq!(view.lines[0].brand, "Intel");
    assert_eq!(view.lines[0].category_name, "Processeur (CPU)");
    assert_eq!(view.lines[0].partner_name.as_deref(), Some("LDLC"));
}

#[tokio::test]
async fn category_rename_rederives_slug() {
    let h = harness().await;

    let category = h
        .catalog
        .create_category(
            &h.admin,
            CategoryDraft {
                name: "Carte graphique (GPU)".to_string(),
                description: None,
                icon: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(category.slug, "carte-graphique-gpu");

    let renamed = h
        .catalog
        .update_category(
            &h.admin,
            &category.id,
            CategoryChanges {
                name: Some("Mémoire RAM".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.slug, "memoire-ram");

    // Mutations require the admin capability
    let err = h
        .catalog
        .update_category(&h.alice, &category.id, CategoryChanges::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Authorization(_)));
}

#[tokio::test]
async fn optional_fields_can_be_set_and_cleared() {
    let h = harness().await;
    let comp = seed_component(&h).await;

    // Configuration description: set, then clear back to NULL
    let cfg = h
        .configurations
        .create(&h.alice, draft("Gaming", vec![item(&comp, 59999, 1)]))
        .await
        .unwrap();
    let with_description = h
        .configurations
        .update(
            &cfg.id,
            &h.alice,
            ConfigurationChanges {
                description: Some(Some("Silent build".to_string())),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(with_description.description.as_deref(), Some("Silent build"));

    let cleared = h
        .configurations
        .update(
            &cfg.id,
            &h.alice,
            ConfigurationChanges {
                description: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(cleared.description, None);

    // Same convention on catalog categories
    let category = h
        .catalog
        .create_category(
            &h.admin,
            CategoryDraft {
                name: "Boîtier".to_string(),
                description: None,
                icon: Some("case".to_string()),
            },
        )
        .await
        .unwrap();
    let cleared = h
        .catalog
        .update_category(
            &h.admin,
            &category.id,
            CategoryChanges {
                icon: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(cleared.icon, None);

    // Untouched fields stay untouched
    let unchanged = h
        .catalog
        .update_category(&h.admin, &category.id, CategoryChanges::default())
        .await
        .unwrap();
    assert_eq!(unchanged.name, "Boîtier");
}

#[tokio::test]
async fn partner_price_sub_id_lifecycle() {
    let h = harness().await;
    let comp = seed_component(&h).await;

    let partner = h
        .catalog
        .create_partner(
            &h.admin,
            PartnerDraft {
                name: "Amazon".to_string(),
                website: "https://www.amazon.fr".to_string(),
                logo: None,
                affiliate: Default::default(),
                contact_email: None,
            },
        )
        .await
        .unwrap();

    // Unknown partner on add is a referential error
    let err = h
        .catalog
        .add_partner_price(
            &h.admin,
            &comp,
            PartnerPriceDraft {
                partner_id: "no-such-partner".to_string(),
                price_cents: 100,
                url: None,
                in_stock: true,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Referential { entity: "Partner", .. }));

    let with_offer = h
        .catalog
        .add_partner_price(
            &h.admin,
            &comp,
            PartnerPriceDraft {
                partner_id: partner.id.clone(),
                price_cents: 58999,
                url: None,
                in_stock: true,
            },
        )
        .await
        .unwrap();
    assert_eq!(with_offer.partner_prices.len(), 1);
    let price_id = with_offer.partner_prices[0].id.clone();

    let updated = h
        .catalog
        .update_partner_price(
            &h.admin,
            &comp,
            &price_id,
            PartnerPriceDraft {
                partner_id: partner.id.clone(),
                price_cents: 57999,
                url: None,
                in_stock: false,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.partner_prices[0].price_cents, 57999);
    assert!(!updated.partner_prices[0].in_stock);

    // Unknown sub-id is NotFound
    let err = h
        .catalog
        .remove_partner_price(&h.admin, &comp, "no-such-entry")
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { .. }));

    let cleared = h
        .catalog
        .remove_partner_price(&h.admin, &comp, &price_id)
        .await
        .unwrap();
    assert!(cleared.partner_prices.is_empty());
}

#[tokio::test]
async fn user_delete_cascades_configurations() {
    let h = harness().await;
    let comp = seed_component(&h).await;

    h.configurations
        .create(&h.alice, draft("A", vec![item(&comp, 100, 1)]))
        .await
        .unwrap();
    h.configurations
        .create(&h.alice, draft("B", vec![item(&comp, 200, 1)]))
        .await
        .unwrap();

    // Admin gate on user administration
    let err = h.users.delete(&h.alice, &h.bob.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::Authorization(_)));

    h.users.delete(&h.admin, &h.alice.id).await.unwrap();

    assert!(h.db.users().get_by_id(&h.alice.id).await.unwrap().is_none());
    assert_eq!(
        h.db.configurations().count_for_user(&h.alice.id).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn user_update_validates_email() {
    let h = harness().await;

    let err = h
        .users
        .update(
            &h.admin,
            &h.bob.id,
            UserChanges {
                email: Some("not-an-email".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let updated = h
        .users
        .update(
            &h.admin,
            &h.bob.id,
            UserChanges {
                email: Some("  Bob@Example.COM ".to_string()),
                role: Some(Role::Admin),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.email, "bob@example.com");
    assert_eq!(updated.role, Role::Admin);

    // Duplicate email surfaces as validation
    let err = h
        .users
        .update(
            &h.admin,
            &h.bob.id,
            UserChanges {
                email: Some("alice@example.com".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let listed = h
        .users
        .list(&h.admin, &UserFilter::default(), 20, 0)
        .await
        .unwrap();
    assert_eq!(listed.len(), 3);
}
