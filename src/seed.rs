use rand::{seq::SliceRandom, Rng};
use sea_orm::{DatabaseConnection, DbErr, TransactionTrait};
use tracing::info;

use crate::entities::category;
use crate::repository::category as category_store;
use crate::repository::product::{self as product_store, NewProduct};

const CATEGORY_NAMES: [&str; 8] = [
    "Tecnología",
    "Ropa",
    "Hogar",
    "Deportes",
    "Salud",
    "Libros",
    "Mascotas",
    "Juguetes",
];

const NOUNS: [&str; 10] = [
    "Lámpara", "Mochila", "Auriculares", "Cafetera", "Balón", "Novela", "Collar", "Rompecabezas",
    "Chaqueta", "Termo",
];

const ADJECTIVES: [&str; 10] = [
    "Compacto", "Clásico", "Premium", "Ecológico", "Portátil", "Resistente", "Ligero", "Moderno",
    "Artesanal", "Inteligente",
];

const BATCH_SIZE: usize = 500;

/// Makes sure the demo categories exist and bulk inserts `count` random products.
/// Returns how many products were written.
pub async fn seed_catalog(db: &DatabaseConnection, count: usize) -> Result<u64, DbErr> {
    let txn = db.begin().await?;

    let mut categories = Vec::with_capacity(CATEGORY_NAMES.len());
    for name in CATEGORY_NAMES {
        let description = format!("Artículos de {}", name.to_lowercase());
        let (model, created) = category_store::get_or_create(&txn, name, Some(description)).await?;
        if created {
            info!(category = name, "Created category");
        }
        categories.push(model);
    }

    let products = random_products(&categories, count);
    let mut inserted = 0;
    for chunk in products.chunks(BATCH_SIZE) {
        inserted += product_store::insert_many(&txn, chunk.to_vec()).await?;
    }

    txn.commit().await?;
    info!(categories = categories.len(), products = inserted, "Catalog seeded");
    Ok(inserted)
}

fn random_products(categories: &[category::Model], count: usize) -> Vec<NewProduct> {
    let mut rng = rand::thread_rng();
    let mut products = Vec::with_capacity(count);

    for n in 0..count {
        let Some(category) = categories.choose(&mut rng) else {
            break;
        };
        let noun = NOUNS.choose(&mut rng).copied().unwrap_or("Producto");
        let adjective = ADJECTIVES.choose(&mut rng).copied().unwrap_or("Genérico");

        products.push(NewProduct {
            name: format!("{noun} {adjective} {}", n + 1),
            description: format!("{noun} {} de la sección {}", adjective.to_lowercase(), category.name),
            price: rng.gen_range(5..=2000),
            stock: rng.gen_range(1..=500),
            image_url: format!(
                "https://picsum.photos/400/300?random={}",
                rng.gen_range(1..=1000)
            ),
            category_id: category.id,
        });
    }

    products
}
