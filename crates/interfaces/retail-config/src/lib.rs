//! Central constants for the fulfillment workflow's fixed copy and defaults.

/// Customer shown on the demo order.
pub const DEFAULT_CUSTOMER: &str = "Bob Dobalina";

/// Instructions seeded when the order screen first appears.
pub const DEFAULT_INSTRUCTIONS: [&str; 3] = [
    "Tap start to claim this order",
    "Mark items found or not found",
    "Choose a Delivery Location",
];

/// Drop-off choices offered once picking is finished.
pub const DELIVERY_LOCATION_CHOICES: [&str; 2] = ["Cash Register", "Front Door"];

/// Used when an order completes without a delivery preference.
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// Appended to the instructions when an order is canceled.
pub const CANCELED_CLOSING_INSTRUCTION: &str = "You're all set!";

/// Prefix of the instruction appended when an order completes.
pub const DELIVER_TO_PREFIX: &str = "Deliver to";

/// Focused instruction while products are being found.
pub const FIND_PRODUCTS_FOCUS: usize = 1;

/// Focused instruction while a delivery location is chosen.
pub const CHOOSE_DELIVERY_FOCUS: usize = 2;

/// Focused instruction once the order is completed or canceled.
pub const TERMINAL_FOCUS: usize = 3;

/// Maximum significant digits used when printing elapsed seconds.
pub const ELAPSED_SIGNIFICANT_DIGITS: u32 = 2;

/// Builds the instruction appended on completion.
pub fn deliver_to_instruction(location: &str) -> String {
    format!("{DELIVER_TO_PREFIX} {location}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deliver_to_instruction_names_the_location() {
        assert_eq!(deliver_to_instruction("Front Door"), "Deliver to Front Door");
    }
}
