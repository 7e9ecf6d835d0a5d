//! Demo dataset: wipes users, restaurants and menu items, then reseeds them.
//! Orders and payment methods are left alone. Runs before serving when the
//! binary is built with the `seed` feature.

use mongodb::bson::DateTime;
use tracing::info;
use uuid::Uuid;

use crate::{
    domain::{Country, MenuItem, Restaurant, Role, User},
    error::ApiError,
    password,
    store::Stores,
};

const USERS: &[(&str, &str, Role, Option<Country>)] = &[
    ("Nick Fury", "nick.fury@example.com", Role::Admin, None),
    (
        "Captain Marvel",
        "captain.marvel@example.com",
        Role::Manager,
        Some(Country::India),
    ),
    (
        "Captain America",
        "captain.america@example.com",
        Role::Manager,
        Some(Country::America),
    ),
    ("Thanos", "thanos@example.com", Role::Member, Some(Country::India)),
    ("Thor", "thor@example.com", Role::Member, Some(Country::India)),
    ("Travis", "travis@example.com", Role::Member, Some(Country::America)),
];

const RESTAURANTS: &[(&str, &str, Country)] = &[
    ("Tasty India", "Tasty", Country::India),
    ("Curry House", "Curry", Country::India),
    ("Spice Corner", "Spice", Country::India),
    ("Masala Magic", "Masala", Country::India),
    ("Burger Haven", "Burger", Country::America),
    ("Pasta Place", "Pasta", Country::America),
    ("Taco Town", "Taco", Country::America),
    ("Sushi Corner", "Sushi", Country::America),
];

const ITEMS_PER_RESTAURANT: u32 = 5;

/// Every seeded account logs in with this password.
const SEED_PASSWORD: &str = "password";

pub async fn run(stores: &Stores) -> Result<(), ApiError> {
    stores.users.clear().await?;
    stores.restaurants.clear().await?;
    stores.menu_items.clear().await?;

    let now = DateTime::now();
    let password_hash = password::hash(SEED_PASSWORD)?;

    for (name, email, role, country) in USERS {
        stores
            .users
            .insert(&User {
                id: Uuid::new_v4().to_string(),
                name: name.to_string(),
                email: email.to_string(),
                password_hash: password_hash.clone(),
                role: *role,
                country: *country,
                created_at: now,
                updated_at: now,
            })
            .await?;
    }
    info!("Seeded {} users", USERS.len());

    let mut menu_items = 0;
    for (name, prefix, country) in RESTAURANTS {
        let restaurant = Restaurant {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            country: *country,
            created_at: now,
            updated_at: now,
        };
        stores.restaurants.insert(&restaurant).await?;

        for i in 1..=ITEMS_PER_RESTAURANT {
            stores
                .menu_items
                .insert(&MenuItem {
                    id: Uuid::new_v4().to_string(),
                    restaurant_id: restaurant.id.clone(),
                    name: format!("{prefix} Item {i}"),
                    price: f64::from(i) * 2.0 + 1.5,
                    image_url: format!(
                        "https://images.tiffin.example/{}/item-{i}.jpg",
                        prefix.to_lowercase()
                    ),
                    created_at: now,
                    updated_at: now,
                })
                .await?;
            menu_items += 1;
        }
    }
    info!("Seeded {} restaurants", RESTAURANTS.len());
    info!("Seeded {menu_items} menu items");

    Ok(())
}
