//! # Access Policy
//!
//! Who may see or touch what, as pure decisions over token claims. No I/O
//! happens here; services ask these functions first and the store second.
//!
//! The rules mirror the platform's observed behavior, quirks included:
//! restaurant-by-id is not country scoped, order listing is owner scoped
//! only, and an admin is not exempt from the owner+country match on order
//! reads and transitions (an admin has no country, so admin orders store a
//! null country and only match other null-country selectors).

use crate::{
    domain::{Country, Order, OrderStatus, Role},
    error::ApiError,
    token::Claims,
};

/// Roles allowed to move an order through checkout or cancellation.
pub const TRANSITION_ROLES: &[Role] = &[Role::Admin, Role::Manager];

/// Roles allowed to manage the payment method registry.
pub const PAYMENT_ROLES: &[Role] = &[Role::Admin];

pub fn require_role(claims: &Claims, allowed: &[Role]) -> Result<(), ApiError> {
    if allowed.contains(&claims.role) {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

/// How a catalog read is filtered for this caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogScope {
    /// Admin: no filter.
    Global,
    /// Everyone else: restaurants whose country equals the claim. A caller
    /// without a country matches nothing, since restaurants always have one.
    Country(Option<Country>),
}

pub fn catalog_scope(claims: &Claims) -> CatalogScope {
    match claims.role {
        Role::Admin => CatalogScope::Global,
        Role::Manager | Role::Member => CatalogScope::Country(claims.country),
    }
}

/// The exact-match filter for order reads and status transitions. The store
/// applies it in a single find-matching-and-update, so "doesn't exist",
/// "wrong owner", "wrong country" and "wrong status" are indistinguishable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSelector {
    pub order_id: String,
    pub user_id: String,
    /// Always constrains; `None` matches a stored null country.
    pub country: Option<Country>,
    /// Constrains only when present.
    pub status: Option<OrderStatus>,
}

impl OrderSelector {
    fn owned(claims: &Claims, order_id: &str) -> Self {
        Self {
            order_id: order_id.to_string(),
            user_id: claims.sub.clone(),
            country: claims.country,
            status: None,
        }
    }

    /// Single-order read: owner and country must match.
    pub fn read(claims: &Claims, order_id: &str) -> Self {
        Self::owned(claims, order_id)
    }

    /// Checkout: additionally requires the order to still be CREATED.
    pub fn checkout(claims: &Claims, order_id: &str) -> Self {
        Self {
            status: Some(OrderStatus::Created),
            ..Self::owned(claims, order_id)
        }
    }

    /// Cancel: no status precondition, so a PAID order can still cancel.
    pub fn cancel(claims: &Claims, order_id: &str) -> Self {
        Self::owned(claims, order_id)
    }

    pub fn matches(&self, order: &Order) -> bool {
        order.id == self.order_id
            && order.user_id == self.user_id
            && order.country == self.country
            && self.status.is_none_or(|status| order.status == status)
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::DateTime;

    use super::{catalog_scope, require_role, CatalogScope, OrderSelector, PAYMENT_ROLES, TRANSITION_ROLES};
    use crate::{
        domain::{Country, Order, OrderItem, OrderStatus, Role},
        token::Claims,
    };

    fn claims(sub: &str, role: Role, country: Option<Country>) -> Claims {
        Claims {
            sub: sub.into(),
            email: format!("{sub}@example.com"),
            role,
            country,
            iat: 0,
            exp: i64::MAX,
        }
    }

    fn order(id: &str, user_id: &str, country: Option<Country>, status: OrderStatus) -> Order {
        Order {
            id: id.into(),
            user_id: user_id.into(),
            country,
            status,
            items: vec![OrderItem {
                menu_item_id: "menu-1".into(),
                quantity: 1,
            }],
            created_at: DateTime::now(),
            updated_at: DateTime::now(),
        }
    }

    #[test]
    fn transition_roles_exclude_members() {
        let manager = claims("m", Role::Manager, Some(Country::India));
        let member = claims("u", Role::Member, Some(Country::India));
        let admin = claims("a", Role::Admin, None);

        assert!(require_role(&admin, TRANSITION_ROLES).is_ok());
        assert!(require_role(&manager, TRANSITION_ROLES).is_ok());
        assert!(require_role(&member, TRANSITION_ROLES).is_err());
    }

    #[test]
    fn payment_roles_are_admin_only() {
        assert!(require_role(&claims("a", Role::Admin, None), PAYMENT_ROLES).is_ok());
        assert!(
            require_role(&claims("m", Role::Manager, Some(Country::India)), PAYMENT_ROLES)
                .is_err()
        );
        assert!(
            require_role(&claims("u", Role::Member, Some(Country::America)), PAYMENT_ROLES)
                .is_err()
        );
    }

    #[test]
    fn admin_catalog_is_unfiltered() {
        assert_eq!(
            catalog_scope(&claims("a", Role::Admin, None)),
            CatalogScope::Global
        );
    }

    #[test]
    fn non_admin_catalog_is_country_filtered() {
        assert_eq!(
            catalog_scope(&claims("u", Role::Member, Some(Country::India))),
            CatalogScope::Country(Some(Country::India))
        );
        // A countryless manager matches nothing rather than everything.
        assert_eq!(
            catalog_scope(&claims("m", Role::Manager, None)),
            CatalogScope::Country(None)
        );
    }

    #[test]
    fn checkout_selector_requires_created_status() {
        let caller = claims("u", Role::Manager, Some(Country::India));
        let selector = OrderSelector::checkout(&caller, "order-1");

        assert!(selector.matches(&order(
            "order-1",
            "u",
            Some(Country::India),
            OrderStatus::Created
        )));
        assert!(!selector.matches(&order(
            "order-1",
            "u",
            Some(Country::India),
            OrderStatus::Paid
        )));
    }

    #[test]
    fn cancel_selector_ignores_status() {
        let caller = claims("u", Role::Manager, Some(Country::India));
        let selector = OrderSelector::cancel(&caller, "order-1");

        assert!(selector.matches(&order(
            "order-1",
            "u",
            Some(Country::India),
            OrderStatus::Paid
        )));
        assert!(selector.matches(&order(
            "order-1",
            "u",
            Some(Country::India),
            OrderStatus::Created
        )));
    }

    #[test]
    fn selector_rejects_other_owner_or_country() {
        let caller = claims("u", Role::Manager, Some(Country::India));
        let selector = OrderSelector::read(&caller, "order-1");

        assert!(!selector.matches(&order(
            "order-1",
            "someone-else",
            Some(Country::India),
            OrderStatus::Created
        )));
        assert!(!selector.matches(&order(
            "order-1",
            "u",
            Some(Country::America),
            OrderStatus::Created
        )));
        assert!(!selector.matches(&order(
            "order-2",
            "u",
            Some(Country::India),
            OrderStatus::Created
        )));
    }

    #[test]
    fn admin_selector_only_matches_null_country_orders() {
        let admin = claims("a", Role::Admin, None);
        let selector = OrderSelector::read(&admin, "order-1");

        assert!(selector.matches(&order("order-1", "a", None, OrderStatus::Created)));
        assert!(!selector.matches(&order(
            "order-1",
            "a",
            Some(Country::India),
            OrderStatus::Created
        )));
    }
}
