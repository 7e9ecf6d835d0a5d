use std::sync::Arc;

use crate::{
    domain::{MenuItemView, Restaurant, RestaurantView},
    error::ApiError,
    policy::{self, CatalogScope},
    store::{MenuItemStore, RestaurantStore},
    token::Claims,
};

/// Read-only restaurant/menu projection. Listing is country scoped for
/// non-admins; the by-id lookup is not scoped at all, matching the
/// platform's observed behavior.
#[derive(Clone)]
pub struct CatalogService {
    restaurants: Arc<dyn RestaurantStore>,
    menu_items: Arc<dyn MenuItemStore>,
}

impl CatalogService {
    pub fn new(restaurants: Arc<dyn RestaurantStore>, menu_items: Arc<dyn MenuItemStore>) -> Self {
        Self {
            restaurants,
            menu_items,
        }
    }

    pub async fn list_restaurants(&self, claims: &Claims) -> Result<Vec<RestaurantView>, ApiError> {
        let restaurants = match policy::catalog_scope(claims) {
            CatalogScope::Global => self.restaurants.list_all().await?,
            CatalogScope::Country(country) => self.restaurants.list_by_country(country).await?,
        };

        let mut views = Vec::with_capacity(restaurants.len());
        for restaurant in &restaurants {
            views.push(self.with_menu(restaurant).await?);
        }
        Ok(views)
    }

    pub async fn get_restaurant(&self, id: &str) -> Result<RestaurantView, ApiError> {
        let restaurant = self
            .restaurants
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFoundOrForbidden("Restaurant"))?;

        self.with_menu(&restaurant).await
    }

    async fn with_menu(&self, restaurant: &Restaurant) -> Result<RestaurantView, ApiError> {
        let items = self.menu_items.list_for_restaurant(&restaurant.id).await?;

        Ok(RestaurantView {
            id: restaurant.id.clone(),
            name: restaurant.name.clone(),
            country: restaurant.country,
            menu_items: items.iter().map(MenuItemView::from).collect(),
        })
    }
}
