use leptos::prelude::*;
use wasm_bindgen::JsCast;

use super::view_model::ProductFormViewModel;
use crate::layout::global_context::{use_app_context, Page};

#[component]
pub fn ProductDetails(id: Option<i64>) -> impl IntoView {
    let ctx = use_app_context();
    let vm = ProductFormViewModel::new(id);
    vm.load_if_needed();

    let vm_clone = vm.clone();

    view! {
        <div class="details-container product-details">
            <div class="details-header">
                <h3>
                    {
                        let vm = vm_clone.clone();
                        move || if vm.is_edit_mode() { "Edit Product" } else { "New Product" }
                    }
                </h3>
                <span class="product-id">
                    {
                        let vm = vm_clone.clone();
                        move || {
                            vm.product_id()
                                .map(|id| format!("Product ID: {}", id))
                                .unwrap_or_default()
                        }
                    }
                </span>
            </div>

            {
                let vm = vm_clone.clone();
                move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })
            }

            // Metadata sections: visible while the workflow is in its
            // details stage.
            <div
                class="details-form"
                style:display={
                    let vm = vm_clone.clone();
                    move || if vm.showing_details() { "block" } else { "none" }
                }
            >
                <div class="form-group">
                    <label for="product-name">{"Name"}</label>
                    <input
                        type="text"
                        id="product-name"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().name
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| {
                                vm.form.update(|f| f.name = event_target_value(&ev));
                            }
                        }
                        placeholder="Product name"
                    />
                </div>

                <div class="form-group">
                    <label for="description">{"Description"}</label>
                    <textarea
                        id="description"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().description
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| {
                                vm.form.update(|f| f.description = event_target_value(&ev));
                            }
                        }
                        placeholder="What is this product?"
                        rows="3"
                    />
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="product-price">{"Price"}</label>
                        <input
                            type="number"
                            step="0.01"
                            id="product-price"
                            prop:value={
                                let vm = vm_clone.clone();
                                move || vm.form.get().price
                            }
                            on:input={
                                let vm = vm_clone.clone();
                                move |ev| {
                                    vm.form.update(|f| f.price = event_target_value(&ev));
                                }
                            }
                            placeholder="0.00"
                        />
                    </div>

                    <div class="form-group">
                        <label for="product-cost-price">{"Cost Price"}</label>
                        <input
                            type="number"
                            step="0.01"
                            id="product-cost-price"
                            prop:value={
                                let vm = vm_clone.clone();
                                move || vm.form.get().cost_price
                            }
                            on:input={
                                let vm = vm_clone.clone();
                                move |ev| {
                                    vm.form.update(|f| f.cost_price = event_target_value(&ev));
                                }
                            }
                            placeholder="0.00"
                        />
                    </div>
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="product-stock">{"Stock Quantity"}</label>
                        <input
                            type="number"
                            id="product-stock"
                            prop:value={
                                let vm = vm_clone.clone();
                                move || vm.form.get().stock_quantity
                            }
                            on:input={
                                let vm = vm_clone.clone();
                                move |ev| {
                                    vm.form.update(|f| f.stock_quantity = event_target_value(&ev));
                                }
                            }
                            placeholder="0"
                        />
                    </div>

                    <div class="form-group">
                        <label for="product-low-stock">{"Low Stock Level"}</label>
                        <input
                            type="number"
                            id="product-low-stock"
                            prop:value={
                                let vm = vm_clone.clone();
                                move || vm.form.get().min_stock_level
                            }
                            on:input={
                                let vm = vm_clone.clone();
                                move |ev| {
                                    vm.form.update(|f| f.min_stock_level = event_target_value(&ev));
                                }
                            }
                            placeholder="0"
                        />
                    </div>
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="product-weight">{"Weight (kg)"}</label>
                        <input
                            type="number"
                            step="0.01"
                            id="product-weight"
                            prop:value={
                                let vm = vm_clone.clone();
                                move || vm.form.get().weight
                            }
                            on:input={
                                let vm = vm_clone.clone();
                                move |ev| {
                                    vm.form.update(|f| f.weight = event_target_value(&ev));
                                }
                            }
                            placeholder="0.0"
                        />
                    </div>

                    <div class="form-group">
                        <label for="product-dimensions">{"Dimensions (L,W,H in cm)"}</label>
                        <input
                            type="text"
                            id="product-dimensions"
                            prop:value={
                                let vm = vm_clone.clone();
                                move || vm.form.get().dimensions
                            }
                            on:input={
                                let vm = vm_clone.clone();
                                move |ev| {
                                    vm.form.update(|f| f.dimensions = event_target_value(&ev));
                                }
                            }
                            placeholder="10,20,5"
                        />
                    </div>
                </div>

                <div class="form-group attributes-section">
                    <label>
                        {"Product Attributes (Tip: for lists, separate values with commas, e.g. \"iOS, Android, Windows\")"}
                    </label>
                    {
                        let vm = vm_clone.clone();
                        move || {
                            let vm_rows = vm.clone();
                            vm.attribute_rows
                                .get()
                                .into_iter()
                                .enumerate()
                                .map(|(index, row)| {
                                    let vm_remove = vm_rows.clone();
                                    view! {
                                        <div class="attribute-row">
                                            <input
                                                type="text"
                                                class="attribute-key"
                                                placeholder="Attribute Key"
                                                prop:value=move || row.key.get()
                                                on:input=move |ev| row.key.set(event_target_value(&ev))
                                            />
                                            <input
                                                type="text"
                                                class="attribute-value"
                                                placeholder="Attribute Value"
                                                prop:value=move || row.value.get()
                                                on:input=move |ev| row.value.set(event_target_value(&ev))
                                            />
                                            <button
                                                type="button"
                                                class="btn btn-danger btn-sm"
                                                on:click=move |_| vm_remove.remove_attribute_row(index)
                                            >
                                                "×"
                                            </button>
                                        </div>
                                    }
                                })
                                .collect_view()
                        }
                    }
                    <button
                        type="button"
                        class="btn btn-outline btn-sm"
                        on:click={
                            let vm = vm_clone.clone();
                            move |_| vm.add_attribute_row()
                        }
                    >
                        "Add Attribute"
                    </button>
                </div>
            </div>

            // Image staging: visible once the workflow reaches its image
            // stage.
            <div
                class="image-section"
                style:display={
                    let vm = vm_clone.clone();
                    move || if vm.showing_images() { "block" } else { "none" }
                }
            >
                <div class="form-group">
                    <label for="file-input">{"Product Images"}</label>
                    <input
                        type="file"
                        id="file-input"
                        multiple
                        accept="image/*"
                        on:change={
                            let vm = vm_clone.clone();
                            move |ev| {
                                if let Some(input) = ev
                                    .target()
                                    .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                                {
                                    vm.handle_files_selected(input);
                                }
                            }
                        }
                    />
                </div>

                <div class="image-previews">
                    {
                        let vm = vm_clone.clone();
                        move || {
                            let vm_inner = vm.clone();
                            vm.images
                                .with(|set| {
                                    set.iter()
                                        .enumerate()
                                        .map(|(index, image)| {
                                            (index, image.name.clone(), image.data_url())
                                        })
                                        .collect::<Vec<_>>()
                                })
                                .into_iter()
                                .map(|(index, name, src)| {
                                    let vm_remove = vm_inner.clone();
                                    view! {
                                        <div class="preview-container">
                                            <img class="preview-img" src=src title=name />
                                            <button
                                                type="button"
                                                class="btn btn-danger btn-sm remove-image"
                                                on:click=move |_| vm_remove.remove_image(index)
                                            >
                                                "×"
                                            </button>
                                        </div>
                                    }
                                })
                                .collect_view()
                        }
                    }
                </div>

                <button
                    type="button"
                    class="btn btn-outline btn-sm"
                    on:click={
                        let vm = vm_clone.clone();
                        move |_| vm.images.update(|set| set.clear())
                    }
                >
                    "Clear All"
                </button>
            </div>

            {
                let vm = vm_clone.clone();
                move || {
                    if vm.is_done() {
                        view! {
                            <div class="success-message">
                                {"All done. The product and its images are saved."}
                            </div>
                        }
                            .into_any()
                    } else {
                        view! { <></> }.into_any()
                    }
                }
            }

            <div class="details-actions">
                <button
                    class="btn btn-primary"
                    on:click={
                        let vm = vm_clone.clone();
                        move |_| {
                            if vm.showing_details() {
                                vm.submit_details();
                            } else if vm.showing_images() {
                                vm.submit_images();
                            } else {
                                ctx.navigate(Page::Products);
                            }
                        }
                    }
                >
                    {
                        let vm = vm_clone.clone();
                        move || vm.primary_label()
                    }
                </button>
                {
                    let vm = vm_clone.clone();
                    move || {
                        let vm_click = vm.clone();
                        vm.secondary_label()
                            .map(|label| {
                                view! {
                                    <button
                                        class="btn btn-secondary"
                                        on:click=move |_| {
                                            if vm_click.is_edit_mode() {
                                                if vm_click.showing_details() {
                                                    vm_click.advance_to_images();
                                                } else {
                                                    ctx.navigate(Page::Products);
                                                }
                                            } else {
                                                vm_click.reset_form();
                                            }
                                        }
                                    >
                                        {label}
                                    </button>
                                }
                            })
                    }
                }
            </div>
        </div>
    }
}
