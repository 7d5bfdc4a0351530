use contracts::domain::products::Product;
use leptos::prelude::*;
use serde_json::{Map, Value};

use crate::domain::products::api;
use crate::domain::products::images::buffer_to_data_url;
use crate::domain::products::ui::details::form::attribute_display_value;
use crate::layout::global_context::{use_app_context, Page};
use crate::shared::dialog;
use crate::shared::number_format::format_amount;

const PLACEHOLDER_IMAGE: &str = "assets/images/product/placeholder.png";

/// Flatten the attribute mapping for the detail row: nested mappings
/// contribute their sub-entries (indented), everything else renders as
/// `key: value`.
fn attribute_entries(attributes: &Map<String, Value>) -> Vec<(String, String, bool)> {
    let mut entries = Vec::new();
    for (key, value) in attributes {
        match value {
            Value::Object(nested) => {
                for (sub_key, sub_value) in nested {
                    entries.push((sub_key.clone(), attribute_display_value(sub_value), true));
                }
            }
            other => entries.push((key.clone(), attribute_display_value(other), false)),
        }
    }
    entries
}

#[derive(Clone)]
struct ProductRow {
    product_id: i64,
    name: String,
    price: String,
    summary: String,
    thumbnail: String,
    attributes: Vec<(String, String, bool)>,
    is_active: RwSignal<bool>,
    show_attributes: RwSignal<bool>,
}

impl From<Product> for ProductRow {
    fn from(product: Product) -> Self {
        let brand = product
            .attributes
            .get("brand")
            .map(attribute_display_value)
            .unwrap_or_else(|| "Unknown".to_string());
        let model = product
            .attributes
            .get("model")
            .map(attribute_display_value)
            .unwrap_or_default();

        let thumbnail = product
            .primary_image
            .as_ref()
            .and_then(|buffer| buffer_to_data_url(&buffer.data))
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());

        Self {
            product_id: product.product_id,
            name: if product.name.is_empty() {
                "Unnamed Product".to_string()
            } else {
                product.name
            },
            price: format_amount(product.price),
            summary: format!("{} {}", brand, model).trim().to_string(),
            thumbnail,
            attributes: attribute_entries(&product.attributes),
            is_active: RwSignal::new(product.is_active),
            show_attributes: RwSignal::new(false),
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn ProductsList() -> impl IntoView {
    let ctx = use_app_context();
    let (rows, set_rows) = signal::<Vec<ProductRow>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);

    wasm_bindgen_futures::spawn_local(async move {
        match api::fetch_products().await {
            Ok(data) => {
                set_rows.set(data.products.into_iter().map(Into::into).collect());
                set_error.set(None);
            }
            Err(e) => {
                log::error!("Products load failed: {}", e);
                dialog::alert("Failed to load products. Please refresh the page.");
                set_error.set(Some(e.to_string()));
            }
        }
    });

    let handle_delete = move |product_id: i64, name: String| {
        if !dialog::confirm(&format!("Are you sure you want to delete \"{}\"?", name)) {
            return;
        }
        wasm_bindgen_futures::spawn_local(async move {
            match api::delete_product(product_id).await {
                Ok(_) => {
                    dialog::alert("Product deleted successfully!");
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().reload();
                    }
                }
                Err(e) => {
                    log::error!("Error deleting product {}: {}", product_id, e);
                    dialog::alert(
                        "Failed to delete product. It may be associated with existing orders.",
                    );
                }
            }
        });
    };

    let handle_flip = move |product_id: i64, is_active: RwSignal<bool>| {
        wasm_bindgen_futures::spawn_local(async move {
            match api::flip_product_status(product_id).await {
                Ok(_) => {
                    is_active.update(|active| *active = !*active);
                    let activated = is_active.get_untracked();
                    dialog::alert(&format!(
                        "Product {} successfully!",
                        if activated { "activated" } else { "deactivated" }
                    ));
                }
                Err(e) => {
                    log::error!("Error updating product status: {}", e);
                    dialog::alert("Failed to update product status. Please try again.");
                }
            }
        });
    };

    view! {
        <div class="page products-page">
            <div class="page-header">
                <h2>"Products"</h2>
                <button
                    class="btn btn-primary"
                    on:click=move |_| ctx.navigate(Page::ProductCreate)
                >
                    "New Product"
                </button>
            </div>

            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="table-container">
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Product"</th>
                            <th>"Price"</th>
                            <th>"Brand / Model"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            rows.get()
                                .into_iter()
                                .map(|row| {
                                    let product_id = row.product_id;
                                    let is_active = row.is_active;
                                    let show_attributes = row.show_attributes;
                                    let delete_name = row.name.clone();
                                    let attributes = row.attributes.clone();

                                    view! {
                                        <tr>
                                            <td>
                                                <div class="product-cell">
                                                    <img
                                                        class="product-thumb"
                                                        src=row.thumbnail.clone()
                                                        alt=row.name.clone()
                                                    />
                                                    <span class="product-name">{row.name.clone()}</span>
                                                </div>
                                            </td>
                                            <td>{row.price.clone()}</td>
                                            <td>{row.summary.clone()}</td>
                                            <td>
                                                <div class="actions">
                                                    <button
                                                        class="btn btn-soft-primary btn-sm"
                                                        title="Edit Product"
                                                        on:click=move |_| {
                                                            ctx.navigate(Page::ProductEdit(product_id))
                                                        }
                                                    >
                                                        "Edit"
                                                    </button>
                                                    <button
                                                        class="btn btn-soft-danger btn-sm"
                                                        title="Delete Product"
                                                        on:click={
                                                            let name = delete_name.clone();
                                                            move |_| handle_delete(product_id, name.clone())
                                                        }
                                                    >
                                                        "Delete"
                                                    </button>
                                                    <button
                                                        class="btn btn-outline-info btn-sm"
                                                        on:click=move |_| {
                                                            show_attributes.update(|open| *open = !*open)
                                                        }
                                                    >
                                                        {move || {
                                                            if show_attributes.get() {
                                                                "Hide Attributes"
                                                            } else {
                                                                "Show Attributes"
                                                            }
                                                        }}
                                                    </button>
                                                    <button
                                                        class=move || {
                                                            if is_active.get() {
                                                                "btn btn-success btn-sm"
                                                            } else {
                                                                "btn btn-secondary btn-sm"
                                                            }
                                                        }
                                                        on:click=move |_| handle_flip(product_id, is_active)
                                                    >
                                                        {move || if is_active.get() { "Active" } else { "Inactive" }}
                                                    </button>
                                                </div>
                                            </td>
                                        </tr>
                                        <tr
                                            class="detail-row"
                                            style:display=move || {
                                                if show_attributes.get() { "table-row" } else { "none" }
                                            }
                                        >
                                            <td colspan="4">
                                                <div class="attributes-panel">
                                                    <h6>"Product Attributes"</h6>
                                                    <ul>
                                                        {if attributes.is_empty() {
                                                            view! {
                                                                <li class="text-muted">"No attributes available"</li>
                                                            }
                                                                .into_any()
                                                        } else {
                                                            attributes
                                                                .iter()
                                                                .map(|(key, value, indented)| {
                                                                    view! {
                                                                        <li class=if *indented { "indented" } else { "" }>
                                                                            <strong>{format!("{}: ", key)}</strong>
                                                                            {value.clone()}
                                                                        </li>
                                                                    }
                                                                })
                                                                .collect_view()
                                                                .into_any()
                                                        }}
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attribute_entries_flatten_nested_mappings() {
        let attributes = serde_json::from_value::<Map<String, Value>>(json!({
            "brand": "Birdy",
            "colors": ["red", "blue"],
            "specs": {"weight": 1.5, "material": "steel"}
        }))
        .unwrap();

        let entries = attribute_entries(&attributes);
        assert!(entries.contains(&("brand".to_string(), "Birdy".to_string(), false)));
        assert!(entries.contains(&("colors".to_string(), "red, blue".to_string(), false)));
        // Nested mapping contributes indented sub-entries, not itself.
        assert!(entries.contains(&("material".to_string(), "steel".to_string(), true)));
        assert!(entries.contains(&("weight".to_string(), "1.5".to_string(), true)));
        assert!(!entries.iter().any(|(key, _, _)| key == "specs"));
    }
}
