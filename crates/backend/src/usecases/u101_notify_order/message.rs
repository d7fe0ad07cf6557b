use contracts::domain::a001_product::aggregate::Product;
use contracts::domain::a002_order::aggregate::Order;
use contracts::domain::common::AggregateId;

use crate::shared::format::format_price;

const DIVIDER: &str = "──────────────";

/// Build the Telegram notification text for an order.
///
/// Product details come from the live product record when it still exists;
/// otherwise only the snapshotted name and total from the order itself are
/// shown. Uses Telegram Markdown (asterisk bold).
pub fn format_order_message(order: &Order, product: Option<&Product>) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("🛒 *New Order Received!*".to_string());
    lines.push(String::new());

    lines.push(format!("📦 *Product:* {}", order.product_name));
    lines.push(format!("🔢 *Quantity:* {}", order.quantity));
    if let Some(product) = product {
        lines.push(format!("💵 *Unit price:* ${}", format_price(product.price)));
    }
    lines.push(format!("💰 *Total:* ${}", format_price(order.total_price)));
    if let Some(product) = product {
        lines.push(format!(
            "🏷 *Category:* {}",
            product.category.display_name()
        ));
        if let Some(size) = &product.size {
            lines.push(format!("📐 *Size:* {}", size));
        }
        if let Some(paper_type) = &product.paper_type {
            lines.push(format!("📄 *Paper:* {}", paper_type));
        }
    }

    lines.push(DIVIDER.to_string());

    lines.push(format!("👤 *Customer:* {}", order.customer_name));
    lines.push(format!("📞 *Contact:* {}", order.customer_contact));
    if let Some(message) = &order.message {
        lines.push(format!("💬 *Message:* \"{}\"", message));
    }

    lines.push(String::new());
    lines.push(format!(
        "📅 *Date:* {}",
        order
            .base
            .metadata
            .created_at
            .format("%Y-%m-%d %H:%M UTC")
    ));
    lines.push(format!("🆔 *Order:* #{}", short_order_id(order)));
    lines.push(format!(
        "📌 *Status:* {}",
        order.status.code().to_uppercase()
    ));

    lines.join("\n")
}

/// First segment of the order UUID, enough to find it in the admin list
fn short_order_id(order: &Order) -> String {
    let id = order.base.id.as_string();
    id.chars().take(8).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_product::aggregate::Product;
    use contracts::domain::a002_order::aggregate::CreateOrderDto;
    use contracts::enums::product_category::ProductCategory;

    fn order(message: Option<&str>) -> Order {
        Order::new_from_intake(&CreateOrderDto {
            customer_name: "Ana".into(),
            contact: "ana@x.com".into(),
            message: message.map(str::to_string),
            product_id: "p1".into(),
            product_name: "Mug".into(),
            quantity: 2,
            unit_price: 9.5,
        })
    }

    fn product(size: Option<&str>, paper_type: Option<&str>) -> Product {
        Product::new_for_insert(
            "PRD-1".into(),
            "Mug".into(),
            9.5,
            ProductCategory::Crafts,
            None,
            10,
            true,
            size.map(str::to_string),
            paper_type.map(str::to_string),
            None,
        )
    }

    #[test]
    fn test_message_with_full_product_details() {
        let text = format_order_message(&order(None), Some(&product(Some("A5"), Some("cotton 300g"))));

        assert!(text.contains("*Product:* Mug"));
        assert!(text.contains("*Quantity:* 2"));
        assert!(text.contains("*Unit price:* $9.50"));
        assert!(text.contains("*Total:* $19.00"));
        assert!(text.contains("*Category:* Crafts"));
        assert!(text.contains("*Size:* A5"));
        assert!(text.contains("*Paper:* cotton 300g"));
        assert!(text.contains(DIVIDER));
        assert!(text.contains("*Customer:* Ana"));
        assert!(text.contains("*Contact:* ana@x.com"));
        assert!(text.contains("*Status:* PENDING"));
    }

    #[test]
    fn test_message_without_product_omits_product_only_lines() {
        let text = format_order_message(&order(None), None);

        // snapshotted fields survive the product
        assert!(text.contains("*Product:* Mug"));
        assert!(text.contains("*Total:* $19.00"));
        // live-product fields are dropped, not rendered empty
        assert!(!text.contains("*Unit price:*"));
        assert!(!text.contains("*Category:*"));
        assert!(!text.contains("*Size:*"));
        assert!(!text.contains("*Paper:*"));
    }

    #[test]
    fn test_customer_message_is_quoted_verbatim() {
        let text = format_order_message(&order(Some("gift wrap please")), None);
        assert!(text.contains("*Message:* \"gift wrap please\""));

        let without = format_order_message(&order(None), None);
        assert!(!without.contains("*Message:*"));
    }

    #[test]
    fn test_order_id_is_truncated() {
        let o = order(None);
        let text = format_order_message(&o, None);
        let short: String = o.base.id.as_string().chars().take(8).collect();
        assert!(text.contains(&format!("*Order:* #{}", short)));
        assert!(!text.contains(&o.base.id.as_string()));
    }
}
