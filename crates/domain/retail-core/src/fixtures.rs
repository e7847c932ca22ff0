//! Hardcoded demo order.

use crate::{Order, Product};

pub const SEED_ORDER_ID: &str = "6398327";

fn product(title: &str, upc: &str, image: &str, location: &str) -> Product {
    Product {
        title: title.to_string(),
        upc: upc.to_string(),
        image: image.to_string(),
        location: location.to_string(),
    }
}

pub fn seed_products() -> Vec<Product> {
    vec![
        product(
            "MacBook Pro 13” 1TB",
            "885909918161",
            "macbookpro13",
            "Bin 1A",
        ),
        product("iPad Pro 11” 128gb", "888462533391", "ipadpro11", "Bin 2B"),
        product(
            "Magic Keyboard for iPad Pro 11”",
            "888462153501",
            "magickeyboard11",
            "Bin 3A",
        ),
        product("Airpods Pro", "190199246850", "airpodspro", "Bin 2C"),
    ]
}

pub fn seed_order() -> Order {
    Order {
        id: SEED_ORDER_ID.to_string(),
        products: seed_products(),
    }
}
