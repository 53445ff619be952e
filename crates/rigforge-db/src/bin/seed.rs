//! # Seed Data Generator
//!
//! Populates the database with demonstration catalog data.
//!
//! ## Usage
//! ```bash
//! # Seed the default database file
//! cargo run -p rigforge-db --bin seed
//!
//! # Specify database path
//! cargo run -p rigforge-db --bin seed -- --db ./data/rigforge.db
//! ```
//!
//! ## Generated Data
//! - Two accounts: an administrator and a regular test user
//! - Eight hardware categories (CPU, GPU, RAM, storage, ...)
//! - Three merchant partners with affiliate terms
//! - Six components with specifications and partner offers
//! - One demonstration configuration owned by the test user

use chrono::Utc;
use std::env;

use rigforge_core::slug::slugify;
use rigforge_core::{
    pricing, AffiliateProgram, Category, Component, Configuration, LineItem, Partner,
    PartnerPrice, Role, Specification, User,
};
use rigforge_db::repository::generate_id;
use rigforge_db::{Database, DbConfig};

/// Category seed rows: (name, description, icon).
const CATEGORIES: &[(&str, &str, &str)] = &[
    ("Processeur (CPU)", "Unité centrale de traitement", "🔲"),
    ("Carte graphique (GPU)", "Carte graphique pour le rendu visuel", "🎮"),
    ("Mémoire RAM", "Mémoire vive", "💾"),
    ("Stockage", "Disques SSD et HDD", "💿"),
    ("Carte mère", "Carte mère", "🔌"),
    ("Alimentation", "Bloc d'alimentation", "⚡"),
    ("Boîtier", "Boîtier PC", "📦"),
    ("Refroidissement", "Ventilateurs et watercooling", "❄️"),
];

/// Partner seed rows: (name, website, commission bps, terms, affiliate id).
const PARTNERS: &[(&str, &str, u32, &str, &str)] = &[
    (
        "Amazon",
        "https://www.amazon.fr",
        500,
        "Commission de 5% sur les ventes",
        "AMZ-12345",
    ),
    (
        "LDLC",
        "https://www.ldlc.com",
        300,
        "Commission de 3% sur les ventes",
        "LDLC-67890",
    ),
    (
        "RueduCommerce",
        "https://www.rueducommerce.fr",
        400,
        "Commission de 4% sur les ventes",
        "RDC-11111",
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing (RUST_LOG overrides the default level)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./rigforge_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("RigForge Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./rigforge_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 RigForge Seed Data Generator");
    println!("===============================");
    println!("Database: {}", db_path);
    println!();

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Refuse to seed a populated database
    let existing = db.users().list(&Default::default(), 1, 0).await?;
    if !existing.is_empty() {
        println!("⚠ Database already has users");
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let now = Utc::now();

    // Accounts
    let admin = User {
        id: generate_id(),
        name: "Administrateur".to_string(),
        email: "admin@rigforge.example".to_string(),
        password_hash: hash_password("admin123")?,
        role: Role::Admin,
        configuration_ids: vec![],
        created_at: now,
        updated_at: now,
    };
    db.users().insert(&admin).await?;

    let test_user = User {
        id: generate_id(),
        name: "Utilisateur Test".to_string(),
        email: "user@example.com".to_string(),
        password_hash: hash_password("user123")?,
        role: Role::User,
        configuration_ids: vec![],
        created_at: now,
        updated_at: now,
    };
    db.users().insert(&test_user).await?;
    println!("✓ Created 2 accounts");

    // Categories
    let mut categories = Vec::new();
    for (name, description, icon) in CATEGORIES {
        let category = Category {
            id: generate_id(),
            name: name.to_string(),
            slug: slugify(name),
            description: Some(description.to_string()),
            icon: Some(icon.to_string()),
            created_at: now,
            updated_at: now,
        };
        db.categories().insert(&category).await?;
        categories.push(category);
    }
    println!("✓ Created {} categories", categories.len());

    // Partners
    let mut partners = Vec::new();
    for (name, website, commission_bps, terms, affiliate_id) in PARTNERS {
        let partner = Partner {
            id: generate_id(),
            name: name.to_string(),
            website: website.to_string(),
            logo: None,
            affiliate: AffiliateProgram {
                commission_rate_bps: *commission_bps,
                terms: Some(terms.to_string()),
                affiliate_id: Some(affiliate_id.to_string()),
            },
            is_active: true,
            contact_email: None,
            created_at: now,
            updated_at: now,
        };
        db.partners().insert(&partner).await?;
        partners.push(partner);
    }
    println!("✓ Created {} partners", partners.len());

    // Components
    let slug_of = |slug: &str| -> &Category {
        categories
            .iter()
            .find(|c| c.slug == slug)
            .unwrap_or(&categories[0])
    };
    let cpu = slug_of("processeur-cpu");
    let gpu = slug_of("carte-graphique-gpu");
    let ram = slug_of("memoire-ram");
    let storage = slug_of("stockage");

    let components = vec![
        component(
            cpu,
            "Intel",
            "Intel Core i9-13900K",
            "i9-13900K",
            "Processeur Intel de 13ème génération",
            &[
                ("Nombre de cœurs", "24"),
                ("Nombre de threads", "32"),
                ("Fréquence de base", "3.0 GHz"),
                ("Fréquence turbo", "5.8 GHz"),
                ("TDP", "125W"),
            ],
            59999,
            vec![
                offer(&partners[0], 58999, true, "https://amazon.fr/..."),
                offer(&partners[1], 59900, true, "https://ldlc.com/..."),
            ],
        ),
        component(
            cpu,
            "AMD",
            "AMD Ryzen 9 7950X",
            "7950X",
            "Processeur AMD Ryzen série 7000",
            &[
                ("Nombre de cœurs", "16"),
                ("Nombre de threads", "32"),
                ("Fréquence de base", "4.5 GHz"),
                ("Fréquence turbo", "5.7 GHz"),
                ("TDP", "170W"),
            ],
            69999,
            vec![
                offer(&partners[0], 68999, true, "https://amazon.fr/..."),
                offer(&partners[2], 69500, true, "https://rueducommerce.fr/..."),
            ],
        ),
        component(
            gpu,
            "NVIDIA",
            "NVIDIA GeForce RTX 4090",
            "RTX 4090",
            "Carte graphique haut de gamme",
            &[
                ("Mémoire", "24 GB GDDR6X"),
                ("Fréquence GPU", "2.52 GHz"),
                ("CUDA Cores", "16384"),
                ("TDP", "450W"),
            ],
            189999,
            vec![
                offer(&partners[1], 189900, true, "https://ldlc.com/..."),
                offer(&partners[2], 194999, false, "https://rueducommerce.fr/..."),
            ],
        ),
        component(
            gpu,
            "AMD",
            "AMD Radeon RX 7900 XTX",
            "RX 7900 XTX",
            "Carte graphique AMD RDNA 3",
            &[
                ("Mémoire", "24 GB GDDR6"),
                ("Fréquence GPU", "2.5 GHz"),
                ("Stream Processors", "6144"),
                ("TDP", "355W"),
            ],
            99999,
            vec![
                offer(&partners[0], 98999, true, "https://amazon.fr/..."),
                offer(&partners[1], 99900, true, "https://ldlc.com/..."),
            ],
        ),
        component(
            ram,
            "Corsair",
            "Corsair Vengeance DDR5 32GB",
            "CMK32GX5M2D6000C36",
            "Kit de 2 barrettes DDR5 16GB",
            &[
                ("Capacité", "32 GB (2x16GB)"),
                ("Type", "DDR5"),
                ("Fréquence", "6000 MHz"),
                ("Latence", "CL36"),
            ],
            14999,
            vec![
                offer(&partners[0], 14999, true, "https://amazon.fr/..."),
                offer(&partners[1], 15490, true, "https://ldlc.com/..."),
            ],
        ),
        component(
            storage,
            "Samsung",
            "Samsung 990 PRO 2TB",
            "990 PRO",
            "SSD NVMe M.2 PCIe 4.0",
            &[
                ("Capacité", "2 TB"),
                ("Interface", "PCIe 4.0 x4 NVMe"),
                ("Lecture séquentielle", "7450 MB/s"),
                ("Écriture séquentielle", "6900 MB/s"),
                ("Format", "M.2 2280"),
            ],
            18999,
            vec![
                offer(&partners[0], 17999, true, "https://amazon.fr/..."),
                offer(&partners[1], 18990, true, "https://ldlc.com/..."),
            ],
        ),
    ];

    for comp in &components {
        db.components().insert(comp).await?;
    }
    println!("✓ Created {} components", components.len());

    // Demonstration configuration for the test user
    let line_items = vec![
        line(&components[1], &partners[0], 68999), // AMD Ryzen 9 7950X
        line(&components[3], &partners[0], 98999), // AMD Radeon RX 7900 XTX
        line(&components[4], &partners[0], 14999), // Corsair RAM 32GB
        line(&components[5], &partners[0], 17999), // Samsung SSD 2TB
    ];
    let total = pricing::compute_total(&line_items);

    let demo = Configuration {
        id: generate_id(),
        user_id: test_user.id.clone(),
        name: "PC Gaming Haute Performance".to_string(),
        description: Some("Configuration PC pour le gaming 4K".to_string()),
        components: line_items,
        total_cost_cents: total.cents(),
        is_public: false,
        tags: vec!["gaming".to_string(), "4k".to_string()],
        created_at: now,
        updated_at: now,
    };
    db.configurations().insert(&demo).await?;
    println!("✓ Created demonstration configuration ({})", total);

    println!();
    println!("✨ Database seeded");
    println!();
    println!("📋 Test accounts:");
    println!("   Admin: admin@rigforge.example / admin123");
    println!("   User:  user@example.com / user123");

    db.close().await;
    Ok(())
}

/// Hash a password for storage.
fn hash_password(password: &str) -> Result<String, Box<dyn std::error::Error>> {
    use argon2::{
        password_hash::{rand_core::OsRng, SaltString},
        Argon2, PasswordHasher,
    };

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| format!("Failed to hash password: {}", e))?;

    Ok(hash.to_string())
}

fn component(
    category: &Category,
    brand: &str,
    title: &str,
    model: &str,
    description: &str,
    specs: &[(&str, &str)],
    base_price_cents: i64,
    partner_prices: Vec<PartnerPrice>,
) -> Component {
    let now = Utc::now();
    Component {
        id: generate_id(),
        category_id: category.id.clone(),
        brand: brand.to_string(),
        title: title.to_string(),
        model: model.to_string(),
        description: Some(description.to_string()),
        specifications: specs
            .iter()
            .map(|(name, value)| Specification {
                name: name.to_string(),
                value: value.to_string(),
            })
            .collect(),
        image: None,
        base_price_cents,
        partner_prices,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

fn offer(partner: &Partner, price_cents: i64, in_stock: bool, url: &str) -> PartnerPrice {
    PartnerPrice {
        id: generate_id(),
        partner_id: partner.id.clone(),
        price_cents,
        url: Some(url.to_string()),
        in_stock,
        last_updated: Utc::now(),
    }
}

fn line(component: &Component, partner: &Partner, price_cents: i64) -> LineItem {
    LineItem {
        component_id: component.id.clone(),
        selected_partner_id: Some(partner.id.clone()),
        price_cents,
        quantity: 1,
    }
}
