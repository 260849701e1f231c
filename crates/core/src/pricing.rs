//! Cart totals calculation.
//!
//! A pure function from (cart lines, catalog, shipping method, payment
//! method, logged-in flag) to a totals breakdown. All arithmetic is exact
//! decimal and nothing is rounded here; display rounding is a presentation
//! concern.
//!
//! Discounts compose multiplicatively: the sale discount applies per unit
//! before aggregation, the loyalty discount applies once to the aggregated
//! subtotal. A sale item bought by a logged-in user costs
//! `price * 0.95 * 0.98`, not `price * 0.93`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::CartLine;
use crate::catalog::{Catalog, Product};

/// Sale discount rate (0.05) for products flagged `sale`.
pub const SALE_DISCOUNT: Decimal = Decimal::from_parts(5, 0, 0, false, 2);
/// Loyalty discount rate (0.02) applied to the subtotal of logged-in users.
pub const USER_DISCOUNT: Decimal = Decimal::from_parts(2, 0, 0, false, 2);
/// Delivery is free above this subtotal (7000, strictly greater than).
pub const FREE_DELIVERY_THRESHOLD: Decimal = Decimal::from_parts(7000, 0, 0, false, 0);
/// Flat cost (300) for paid delivery and for small mail parcels.
pub const MEDIUM_SHIPPING_COST: Decimal = Decimal::from_parts(300, 0, 0, false, 0);
/// Cost (500) for mail parcels over the weight limit.
pub const LARGE_SHIPPING_COST: Decimal = Decimal::from_parts(500, 0, 0, false, 0);
/// Mail parcels at or under this weight (3 kg) ship at the medium cost.
pub const SMALL_PARCEL_LIMIT_KG: Decimal = Decimal::from_parts(3, 0, 0, false, 0);
/// Cash-on-delivery surcharge rate (0.05), mail shipping only.
pub const COD_SURCHARGE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// How the order ships. Unset until the shopper picks a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShippingMethod {
    /// Courier delivery; free above [`FREE_DELIVERY_THRESHOLD`].
    Delivery,
    /// Postal mail; cost tiers on parcel weight.
    Mail,
}

impl ShippingMethod {
    /// Parse a form value. Unknown strings mean "no method selected".
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "delivery" => Some(Self::Delivery),
            "mail" => Some(Self::Mail),
            _ => None,
        }
    }

    /// The form value for this method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Delivery => "delivery",
            Self::Mail => "mail",
        }
    }
}

/// How the order is paid. Unset until the shopper picks a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Card payment, no surcharge.
    Card,
    /// Cash on delivery; surcharged when combined with mail shipping.
    CashOnDelivery,
}

impl PaymentMethod {
    /// Parse a form value. Unknown strings mean "no method selected".
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "card" => Some(Self::Card),
            "cod" => Some(Self::CashOnDelivery),
            _ => None,
        }
    }

    /// The form value for this method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::CashOnDelivery => "cod",
        }
    }
}

/// A totals breakdown. Derived, never persisted, never rounded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Totals {
    /// Item prices after discounts, summed.
    pub subtotal: Decimal,
    /// Shipping cost for the chosen method, zero when unset.
    pub shipping: Decimal,
    /// Cash-on-delivery surcharge, zero unless mail + COD.
    pub cod_surcharge: Decimal,
    /// `subtotal + shipping + cod_surcharge`.
    pub total: Decimal,
}

/// Per-unit price of a product, with the sale discount applied.
#[must_use]
pub fn unit_price(product: &Product) -> Decimal {
    if product.sale {
        product.price * (Decimal::ONE - SALE_DISCOUNT)
    } else {
        product.price
    }
}

/// Calculate the totals breakdown for a cart.
///
/// Lines whose product id no longer resolves in the catalog are skipped
/// silently.
#[must_use]
pub fn quote(
    lines: &[CartLine],
    catalog: &Catalog,
    shipping: Option<ShippingMethod>,
    payment: Option<PaymentMethod>,
    logged_in: bool,
) -> Totals {
    let mut subtotal = Decimal::ZERO;
    let mut total_weight = Decimal::ZERO;

    for line in lines {
        let Some(product) = catalog.product(&line.product_id) else {
            continue;
        };
        let quantity = Decimal::from(line.quantity);
        subtotal += unit_price(product) * quantity;
        total_weight += product.weight * quantity;
    }

    if logged_in {
        subtotal *= Decimal::ONE - USER_DISCOUNT;
    }

    let shipping_cost = match shipping {
        Some(ShippingMethod::Delivery) => {
            if subtotal > FREE_DELIVERY_THRESHOLD {
                Decimal::ZERO
            } else {
                MEDIUM_SHIPPING_COST
            }
        }
        Some(ShippingMethod::Mail) => {
            if total_weight <= SMALL_PARCEL_LIMIT_KG {
                MEDIUM_SHIPPING_COST
            } else {
                LARGE_SHIPPING_COST
            }
        }
        None => Decimal::ZERO,
    };

    let cod_surcharge = if shipping == Some(ShippingMethod::Mail)
        && payment == Some(PaymentMethod::CashOnDelivery)
    {
        subtotal * COD_SURCHARGE
    } else {
        Decimal::ZERO
    };

    Totals {
        subtotal,
        shipping: shipping_cost,
        cod_surcharge,
        total: subtotal + shipping_cost + cod_surcharge,
    }
}
