//! Display data for templates.
//!
//! View structs hold pre-formatted strings so templates stay free of
//! arithmetic. Prices are rounded to whole units here and nowhere else;
//! the core keeps fractional values.

use orchard_core::Product;
use orchard_core::pricing::{self, PaymentMethod, ShippingMethod, Totals};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::state::AppState;

/// Format a price for display, rounded to whole units.
#[must_use]
pub fn format_price(amount: Decimal) -> String {
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_string()
}

/// Header/footer data rendered on every page.
#[derive(Clone)]
pub struct NavView {
    pub categories: Vec<CategoryLink>,
    pub cart_count: u32,
    pub user_name: Option<String>,
}

/// A category link in the header navigation.
#[derive(Clone)]
pub struct CategoryLink {
    pub id: String,
    pub name: String,
}

impl NavView {
    /// Build the navigation data for the current request.
    #[must_use]
    pub fn build(state: &AppState) -> Self {
        Self {
            categories: state
                .catalog()
                .top_level_categories()
                .into_iter()
                .map(|c| CategoryLink {
                    id: c.id.to_string(),
                    name: c.name.clone(),
                })
                .collect(),
            cart_count: state.cart().count(),
            user_name: state.session().current_user().map(|u| u.name),
        }
    }
}

/// Product card data for listing grids.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub price: String,
    /// Undiscounted price, present only for sale items (strikethrough).
    pub full_price: Option<String>,
    pub image: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: format_price(pricing::unit_price(product)),
            full_price: product.sale.then(|| format_price(product.price)),
            image: product.image.clone(),
        }
    }
}

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    /// Index of the line in the persisted cart, used by update/remove
    /// forms. Not a display row number: stale lines are skipped in the
    /// view but keep their slot in the record.
    pub index: usize,
    pub product_id: String,
    pub name: String,
    pub options_label: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
    pub image: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: "0".to_owned(),
            item_count: 0,
        }
    }

    /// Build the cart view from persisted state.
    ///
    /// Lines whose product no longer exists in the catalog are skipped,
    /// matching the totals calculation.
    #[must_use]
    pub fn build(state: &AppState) -> Self {
        let lines = state.cart().lines();
        let catalog = state.catalog();
        let logged_in = state.session().current_user().is_some();

        let items = lines
            .iter()
            .enumerate()
            .filter_map(|(index, line)| {
                let product = catalog.product(&line.product_id)?;
                let unit = pricing::unit_price(product);
                Some(CartItemView {
                    index,
                    product_id: product.id.to_string(),
                    name: product.name.clone(),
                    options_label: options_label(&line.options),
                    quantity: line.quantity,
                    unit_price: format_price(unit),
                    line_total: format_price(unit * Decimal::from(line.quantity)),
                    image: product.image.clone(),
                })
            })
            .collect::<Vec<_>>();

        let totals = pricing::quote(&lines, catalog, None, None, logged_in);

        Self {
            item_count: items.iter().map(|i| i.quantity).sum(),
            subtotal: format_price(totals.subtotal),
            items,
        }
    }
}

fn options_label(options: &std::collections::BTreeMap<String, String>) -> String {
    options
        .iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Totals breakdown display data for the checkout page.
#[derive(Clone)]
pub struct TotalsView {
    pub subtotal: String,
    pub shipping: String,
    pub cod_surcharge: String,
    pub total: String,
    pub shipping_selected: bool,
    pub cod_applied: bool,
    pub loyalty_applied: bool,
}

impl TotalsView {
    /// Quote the current cart and format the breakdown.
    #[must_use]
    pub fn build(
        state: &AppState,
        shipping: Option<ShippingMethod>,
        payment: Option<PaymentMethod>,
    ) -> Self {
        let logged_in = state.session().current_user().is_some();
        let totals = pricing::quote(
            &state.cart().lines(),
            state.catalog(),
            shipping,
            payment,
            logged_in,
        );
        Self::from_totals(&totals, shipping.is_some(), logged_in)
    }

    fn from_totals(totals: &Totals, shipping_selected: bool, loyalty_applied: bool) -> Self {
        Self {
            subtotal: format_price(totals.subtotal),
            shipping: format_price(totals.shipping),
            cod_surcharge: format_price(totals.cod_surcharge),
            total: format_price(totals.total),
            shipping_selected,
            cod_applied: !totals.cod_surcharge.is_zero(),
            loyalty_applied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price_rounds_to_whole_units() {
        assert_eq!(format_price(Decimal::new(931, 0)), "931");
        assert_eq!(format_price(Decimal::new(4903, 1)), "490"); // 490.3
        assert_eq!(format_price(Decimal::new(4905, 1)), "491"); // 490.5 rounds up
        assert_eq!(format_price(Decimal::ZERO), "0");
    }

    #[test]
    fn test_options_label() {
        let mut options = std::collections::BTreeMap::new();
        assert_eq!(options_label(&options), "");

        options.insert("size".to_owned(), "l/xl".to_owned());
        options.insert("colour".to_owned(), "charcoal".to_owned());
        // BTreeMap ordering keeps the label deterministic.
        assert_eq!(options_label(&options), "colour: charcoal, size: l/xl");
    }
}
