//! Test Helpers

use bazaar::products::{ProductImage, ProductSpecifics, Variants};
use jiff::{Timestamp, civil::date};

use crate::{
    domain::{
        carts::{CartsService, data::NewCartItem},
        coupons::data::CouponTerms,
        customers::records::CustomerUuid,
        orders::{
            OrdersService,
            data::Checkout,
            records::{ContactDetails, OrderRecord, ShippingAddress},
        },
        products::{data::ProductDetails, records::ProductUuid},
    },
    test::TestContext,
};

/// A plain physical product in the Apparel category.
pub(crate) fn product_details(name: &str, price: u64) -> ProductDetails {
    ProductDetails {
        name: name.to_string(),
        description: format!("{name} from the test catalog"),
        price,
        category: "Apparel".to_string(),
        subcategory: None,
        keywords: Vec::new(),
        images: vec![ProductImage {
            url: format!("https://img.example.com/{}.jpg", name.to_lowercase().replace(' ', "-")),
            alt_text: None,
            color: None,
            is_primary: true,
        }],
        specifics: ProductSpecifics::Physical {
            variants: Variants::default(),
        },
    }
}

/// Active, no minimum spend, no usage cap, valid until 2099.
pub(crate) fn coupon_terms(percent_off: u8) -> CouponTerms {
    CouponTerms {
        percent_off,
        active: true,
        minimum_spend: 0,
        valid_till: date(2099, 12, 31),
        max_uses: None,
    }
}

pub(crate) fn cart_item(product_uuid: ProductUuid, quantity: u32) -> NewCartItem {
    NewCartItem {
        product_uuid,
        quantity,
        customization: None,
        display_image: None,
    }
}

pub(crate) fn shipping_address() -> ShippingAddress {
    ShippingAddress {
        line1: "14 MG Road".to_string(),
        line2: None,
        city: "Bengaluru".to_string(),
        state: "Karnataka".to_string(),
        postal_code: "560001".to_string(),
        country: "India".to_string(),
    }
}

pub(crate) fn checkout_details(with_address: bool) -> Checkout {
    Checkout {
        contact: ContactDetails {
            name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: "+91 98450 12345".to_string(),
        },
        shipping_address: with_address.then(shipping_address),
    }
}

/// Put `quantity` Classic Tees in the customer's cart and check out at `placed_at`.
pub(crate) async fn place_order(
    ctx: &TestContext,
    customer: CustomerUuid,
    quantity: u32,
    placed_at: Timestamp,
) -> OrderRecord {
    let tee = ctx.create_product("Classic Tee", 250_00).await;

    ctx.carts
        .add_item(customer, cart_item(tee.uuid, quantity), placed_at)
        .await
        .expect("Failed to fill cart");

    ctx.orders
        .checkout(customer, checkout_details(true), placed_at)
        .await
        .expect("Failed to place order")
}
