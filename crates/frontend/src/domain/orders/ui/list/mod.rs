use std::future::Future;

use contracts::domain::orders::{Order, OrderItem, OrderStatus, OrdersListResponse};
use futures::future::try_join;
use leptos::prelude::*;
use serde_json::Value;

use crate::domain::orders::{api, invoice};
use crate::shared::api_client::ApiError;
use crate::shared::data_binding::MetricBindings;
use crate::shared::date_utils::format_datetime;
use crate::shared::dialog;
use crate::shared::number_format::format_amount;

/// Orders and analytics land together or not at all: if either side
/// fails, the combined load fails and nothing partially renders.
async fn load_page_data<O, A>(
    orders: O,
    analytics: A,
) -> Result<(OrdersListResponse, Value), ApiError>
where
    O: Future<Output = Result<OrdersListResponse, ApiError>>,
    A: Future<Output = Result<Value, ApiError>>,
{
    try_join(orders, analytics).await
}

#[derive(Clone)]
struct OrderRow {
    order_id: i64,
    order_number: String,
    created_at: String,
    total_amount: String,
    customer_name: String,
    customer_email: String,
    customer_phone: String,
    shipping_address: String,
    payment_method: String,
    payment_status: String,
    billing_address: String,
    shipping_amount: String,
    tax_amount: String,
    discount_amount: String,
    status: OrderStatus,
    items: Vec<OrderItem>,
    /// Controls the visibility of this order's detail row. Owned by the
    /// row so the toggle is wired at construction time.
    expanded: RwSignal<bool>,
}

impl From<Order> for OrderRow {
    fn from(order: Order) -> Self {
        Self {
            order_id: order.order_id,
            order_number: order.order_number,
            created_at: format_datetime(&order.created_at),
            total_amount: format_amount(order.total_amount),
            customer_name: order.customer.full_name(),
            customer_email: order.customer.email.unwrap_or_else(|| "-".to_string()),
            customer_phone: order.customer.phone.unwrap_or_else(|| "N/A".to_string()),
            shipping_address: order.shipping_address,
            payment_method: order.payment_method,
            payment_status: order.payment_status,
            billing_address: order.billing_address,
            shipping_amount: format_amount(order.shipping_amount),
            tax_amount: format_amount(order.tax_amount),
            discount_amount: format_amount(order.discount_amount),
            status: order.status,
            items: order.items,
            expanded: RwSignal::new(false),
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn OrdersList() -> impl IntoView {
    let (rows, set_rows) = signal::<Vec<OrderRow>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);

    // Analytics metric table, built once for this render.
    let mut bindings = MetricBindings::new();
    let total_orders = bindings.bind("total_orders");
    let total_revenue = bindings.bind("total_revenue");
    let pending_orders = bindings.bind("pending_orders");
    let delivered_orders = bindings.bind("delivered_orders");

    wasm_bindgen_futures::spawn_local(async move {
        match load_page_data(api::fetch_orders(), api::fetch_analytics()).await {
            Ok((orders_data, analytics_data)) => {
                bindings.apply(&analytics_data);
                set_rows.set(orders_data.orders.into_iter().map(Into::into).collect());
                set_error.set(None);
            }
            Err(e) => {
                log::error!("Orders load failed: {}", e);
                dialog::alert("Failed to load orders. Please refresh the page.");
                set_error.set(Some(e.to_string()));
            }
        }
    });

    let on_status_change = move |order_id: i64, ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        let Some(status) = OrderStatus::from_str(&value) else {
            return;
        };
        wasm_bindgen_futures::spawn_local(async move {
            match api::update_status(order_id, status).await {
                Ok(_) => {
                    dialog::alert(&format!("Order status updated to: {}", status));
                    // Full reload; nothing is patched in place.
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().reload();
                    }
                }
                Err(e) => {
                    log::error!("Error updating status for order {}: {}", order_id, e);
                    dialog::alert("Failed to update order status. Please try again.");
                }
            }
        });
    };

    let generate_invoice = move |order_id: i64| {
        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch_order(order_id).await {
                Ok(order) => invoice::print_invoice(&order),
                Err(e) => {
                    log::error!("Order fetch failed: {}", e);
                    dialog::alert("Failed to load the order. Please try again.");
                }
            }
        });
    };

    view! {
        <div class="page orders-page">
            <h2>"Orders"</h2>

            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="metric-strip">
                <div class="stat-card">
                    <span class="stat-label">"Total Orders"</span>
                    <span class="stat-value" id="total_orders">{move || total_orders.get()}</span>
                </div>
                <div class="stat-card">
                    <span class="stat-label">"Revenue"</span>
                    <span class="stat-value" id="total_revenue">{move || total_revenue.get()}</span>
                </div>
                <div class="stat-card">
                    <span class="stat-label">"Pending"</span>
                    <span class="stat-value" id="pending_orders">{move || pending_orders.get()}</span>
                </div>
                <div class="stat-card">
                    <span class="stat-label">"Delivered"</span>
                    <span class="stat-value" id="delivered_orders">{move || delivered_orders.get()}</span>
                </div>
            </div>

            <div class="table-container">
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Order #"</th>
                            <th>"Date"</th>
                            <th>"Amount"</th>
                            <th>"Items"</th>
                            <th>"Customer"</th>
                            <th>"Email"</th>
                            <th>"Phone"</th>
                            <th>"Address"</th>
                            <th>"Payment"</th>
                            <th>"Invoice"</th>
                            <th>"Status"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            rows.get()
                                .into_iter()
                                .map(|row| {
                                    let order_id = row.order_id;
                                    let expanded = row.expanded;
                                    let current_status = row.status;
                                    let item_count = row.items.len();

                                    view! {
                                        <tr>
                                            <td>{row.order_number.clone()}</td>
                                            <td>{row.created_at.clone()}</td>
                                            <td>{row.total_amount.clone()}</td>
                                            <td
                                                class="item-count"
                                                style="cursor:pointer;color:blue;text-decoration:underline;"
                                                on:click=move |_| expanded.update(|open| *open = !*open)
                                            >
                                                {item_count.to_string()}
                                            </td>
                                            <td>{row.customer_name.clone()}</td>
                                            <td>{row.customer_email.clone()}</td>
                                            <td>{row.customer_phone.clone()}</td>
                                            <td>{row.shipping_address.clone()}</td>
                                            <td>{row.payment_method.clone()}</td>
                                            <td>
                                                <button
                                                    type="button"
                                                    class="btn btn-info btn-sm"
                                                    on:click=move |_| generate_invoice(order_id)
                                                >
                                                    "Generate"
                                                </button>
                                            </td>
                                            <td>
                                                <select
                                                    class="form-select form-select-sm"
                                                    on:change=move |ev| on_status_change(order_id, ev)
                                                >
                                                    {OrderStatus::ALL
                                                        .iter()
                                                        .map(|status| {
                                                            view! {
                                                                <option
                                                                    value=status.as_str()
                                                                    selected={*status == current_status}
                                                                >
                                                                    {status.as_str()}
                                                                </option>
                                                            }
                                                        })
                                                        .collect_view()}
                                                </select>
                                            </td>
                                        </tr>
                                        <tr
                                            class="detail-row"
                                            style:display=move || {
                                                if expanded.get() { "table-row" } else { "none" }
                                            }
                                        >
                                            <td colspan="11">
                                                <div class="order-detail">
                                                    <h6>"Order Items:"</h6>
                                                    <table class="table table-sm">
                                                        <thead>
                                                            <tr>
                                                                <th>"Product"</th>
                                                                <th>"SKU"</th>
                                                                <th>"Quantity"</th>
                                                                <th>"Unit Price"</th>
                                                                <th>"Total Price"</th>
                                                            </tr>
                                                        </thead>
                                                        <tbody>
                                                            {row.items
                                                                .iter()
                                                                .map(|item| {
                                                                    view! {
                                                                        <tr>
                                                                            <td>{item.product_name.clone()}</td>
                                                                            <td>{item.sku.clone()}</td>
                                                                            <td>{item.quantity.to_string()}</td>
                                                                            <td>{format_amount(item.unit_price)}</td>
                                                                            <td>{format_amount(item.total_price)}</td>
                                                                        </tr>
                                                                    }
                                                                })
                                                                .collect_view()}
                                                        </tbody>
                                                    </table>
                                                    <h6>"Additional Order Details:"</h6>
                                                    <ul class="order-meta">
                                                        <li>
                                                            <strong>"Billing Address: "</strong>
                                                            {row.billing_address.clone()}
                                                        </li>
                                                        <li>
                                                            <strong>"Shipping Charges: "</strong>
                                                            {row.shipping_amount.clone()}
                                                        </li>
                                                        <li>
                                                            <strong>"Tax: "</strong>
                                                            {row.tax_amount.clone()}
                                                        </li>
                                                        <li>
                                                            <strong>"Discount: "</strong>
                                                            {row.discount_amount.clone()}
                                                        </li>
                                                        <li>
                                                            <strong>"Payment Status: "</strong>
                                                            <span class="badge">{row.payment_status.clone()}</span>
                                                        </li>
                                                    </ul>
                                                </div>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>
            </div>
        </div>
    }
}
