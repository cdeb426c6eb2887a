//! Flavour content for new sessions: a menu item and an order id.

use rand::Rng;

/// Items a ticket can be for.
pub const MENU: &[&str] = &[
    "Glazed Donut 🍩",
    "Strawberry Milkshake 🥤",
    "Choco Lava Cake 🍰",
    "Blueberry Muffin 🧁",
    "Iced Latte ☕",
    "Rainbow Macaron 🍪",
];

/// Order identifiers handed out with tickets.
pub const ORDER_IDS: &[&str] = &["ABC123", "DEF456", "GHI789"];

/// The generated ticket for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetails {
    pub item: String,
    pub order_id: String,
}

/// Source of ticket content for new sessions.
pub trait ContentGenerator: Send + Sync {
    fn generate(&self) -> OrderDetails;
}

/// Picks uniformly from [`MENU`] and [`ORDER_IDS`].
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomMenu;

impl ContentGenerator for RandomMenu {
    fn generate(&self) -> OrderDetails {
        let mut rng = rand::rng();
        OrderDetails {
            item: MENU[rng.random_range(0..MENU.len())].to_string(),
            order_id: ORDER_IDS[rng.random_range(0..ORDER_IDS.len())].to_string(),
        }
    }
}

/// Always hands out the same ticket.
#[cfg(test)]
pub struct FixedContent(pub OrderDetails);

#[cfg(test)]
impl ContentGenerator for FixedContent {
    fn generate(&self) -> OrderDetails {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_menu_draws_from_fixed_sets() {
        let generator = RandomMenu;
        for _ in 0..50 {
            let details = generator.generate();
            assert!(MENU.contains(&details.item.as_str()));
            assert!(ORDER_IDS.contains(&details.order_id.as_str()));
        }
    }
}
