use leptos::prelude::*;
use wasm_bindgen::JsCast;

use super::form::{self, AttributeRowInput, ProductFormData};
use crate::domain::products::api;
use crate::domain::products::images::{PendingImage, PendingImageSet};
use crate::shared::dialog;

/// Stages of the two-phase create workflow: metadata first, then images
/// against the server-assigned id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CreateStage {
    Editing,
    Created { product_id: i64 },
    Done,
}

/// Stages of the edit workflow. Details may be skipped straight to the
/// image replacement step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditStage {
    ViewingDetails,
    EditingImages,
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create(CreateStage),
    Edit { product_id: i64, stage: EditStage },
}

/// One attribute row as the view binds it. The row list only changes
/// structurally on add/remove, so typing in a row never re-renders the
/// list (and never steals focus).
#[derive(Clone, Copy)]
pub struct AttributeRowSignals {
    pub key: RwSignal<String>,
    pub value: RwSignal<String>,
}

impl AttributeRowSignals {
    fn empty() -> Self {
        Self {
            key: RwSignal::new(String::new()),
            value: RwSignal::new(String::new()),
        }
    }

    fn from_input(row: AttributeRowInput) -> Self {
        Self {
            key: RwSignal::new(row.key),
            value: RwSignal::new(row.value),
        }
    }

    fn snapshot(&self) -> AttributeRowInput {
        AttributeRowInput {
            key: self.key.get_untracked(),
            value: self.value.get_untracked(),
        }
    }
}

/// ViewModel for the product form. Owns the pending image set; the state
/// enums drive every button label and section toggle, never the reverse.
#[derive(Clone)]
pub struct ProductFormViewModel {
    pub mode: RwSignal<FormMode>,
    pub form: RwSignal<ProductFormData>,
    pub attribute_rows: RwSignal<Vec<AttributeRowSignals>>,
    pub images: RwSignal<PendingImageSet>,
    pub error: RwSignal<Option<String>>,
}

impl ProductFormViewModel {
    pub fn new(id: Option<i64>) -> Self {
        let mode = match id {
            Some(product_id) => FormMode::Edit {
                product_id,
                stage: EditStage::ViewingDetails,
            },
            None => FormMode::Create(CreateStage::Editing),
        };
        Self {
            mode: RwSignal::new(mode),
            form: RwSignal::new(ProductFormData::default()),
            attribute_rows: RwSignal::new(vec![AttributeRowSignals::empty()]),
            images: RwSignal::new(PendingImageSet::new()),
            error: RwSignal::new(None),
        }
    }

    /// Plain-data copy of the attribute rows for payload building.
    pub fn attribute_snapshot(&self) -> Vec<AttributeRowInput> {
        self.attribute_rows
            .get_untracked()
            .iter()
            .map(AttributeRowSignals::snapshot)
            .collect()
    }

    /// The id the image endpoints need; known from the start in edit mode,
    /// only after the metadata POST in create mode.
    pub fn product_id(&self) -> Option<i64> {
        match self.mode.get() {
            FormMode::Create(CreateStage::Created { product_id }) => Some(product_id),
            FormMode::Edit { product_id, .. } => Some(product_id),
            FormMode::Create(_) => None,
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        matches!(self.mode.get(), FormMode::Edit { .. })
    }

    pub fn showing_details(&self) -> bool {
        matches!(
            self.mode.get(),
            FormMode::Create(CreateStage::Editing)
                | FormMode::Edit {
                    stage: EditStage::ViewingDetails,
                    ..
                }
        )
    }

    pub fn showing_images(&self) -> bool {
        matches!(
            self.mode.get(),
            FormMode::Create(CreateStage::Created { .. })
                | FormMode::Edit {
                    stage: EditStage::EditingImages,
                    ..
                }
        )
    }

    pub fn is_done(&self) -> bool {
        matches!(
            self.mode.get(),
            FormMode::Create(CreateStage::Done)
                | FormMode::Edit {
                    stage: EditStage::Done,
                    ..
                }
        )
    }

    pub fn primary_label(&self) -> &'static str {
        match self.mode.get() {
            FormMode::Create(CreateStage::Editing) => "Create Product",
            FormMode::Create(CreateStage::Created { .. }) => "Upload Images",
            FormMode::Create(CreateStage::Done) => "Back to Products",
            FormMode::Edit { stage, .. } => match stage {
                EditStage::ViewingDetails => "Edit Details",
                EditStage::EditingImages => "Edit Images",
                EditStage::Done => "Back to Products",
            },
        }
    }

    pub fn secondary_label(&self) -> Option<&'static str> {
        match self.mode.get() {
            FormMode::Create(CreateStage::Editing) => Some("Reset"),
            FormMode::Create(_) => None,
            FormMode::Edit { stage, .. } => match stage {
                EditStage::ViewingDetails => Some("Skip Details"),
                EditStage::EditingImages => Some("Back to Products"),
                EditStage::Done => None,
            },
        }
    }

    /// Metadata step succeeded in create mode.
    pub fn mark_created(&self, product_id: i64) {
        self.mode
            .set(FormMode::Create(CreateStage::Created { product_id }));
    }

    /// Move an edit session to the image step, after a PUT or via skip.
    pub fn advance_to_images(&self) {
        if let FormMode::Edit { product_id, .. } = self.mode.get() {
            self.mode.set(FormMode::Edit {
                product_id,
                stage: EditStage::EditingImages,
            });
        }
    }

    /// Image step succeeded; the workflow is finished.
    pub fn mark_done(&self) {
        match self.mode.get() {
            FormMode::Create(_) => self.mode.set(FormMode::Create(CreateStage::Done)),
            FormMode::Edit { product_id, .. } => self.mode.set(FormMode::Edit {
                product_id,
                stage: EditStage::Done,
            }),
        }
    }

    /// Load the product into the form in edit mode.
    pub fn load_if_needed(&self) {
        let FormMode::Edit { product_id, .. } = self.mode.get() else {
            return;
        };
        let vm = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch_product(product_id).await {
                Ok(product) => {
                    let (form, rows) = form::form_from_product(&product);
                    vm.form.set(form);
                    vm.attribute_rows
                        .set(rows.into_iter().map(AttributeRowSignals::from_input).collect());
                    if !product.images.is_empty() {
                        vm.images.update(|set| {
                            let added = set.restore_from_buffers(&product.images);
                            log::info!(
                                "Restored {} of {} stored images",
                                added,
                                product.images.len()
                            );
                        });
                    }
                }
                Err(e) => {
                    log::error!("Error loading product {}: {}", product_id, e);
                    dialog::alert("Failed to load product data. Please try again.");
                }
            }
        });
    }

    /// Validate and send the metadata, then advance the workflow. In
    /// create mode this is the POST that obtains the product id; in edit
    /// mode a full-replacement PUT.
    pub fn submit_details(&self) {
        let payload = match form::build_payload(&self.form.get(), &self.attribute_snapshot()) {
            Ok(payload) => payload,
            Err(validation) => {
                // No request leaves the client for an invalid form.
                self.error.set(Some(validation.to_string()));
                return;
            }
        };
        self.error.set(None);

        let vm = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match vm.mode.get_untracked() {
                FormMode::Create(_) => match api::create_product(&payload).await {
                    Ok(response) => {
                        dialog::alert("Product created successfully!");
                        vm.mark_created(response.product.product_id);
                    }
                    Err(e) => {
                        log::error!("Error creating product: {}", e);
                        dialog::alert(
                            "Failed to create product. Please check your input and try again.",
                        );
                    }
                },
                FormMode::Edit { product_id, .. } => {
                    match api::update_product(product_id, &payload).await {
                        Ok(_) => {
                            dialog::alert("Product updated successfully!");
                            vm.advance_to_images();
                        }
                        Err(e) => {
                            log::error!("Error updating product {}: {}", product_id, e);
                            dialog::alert(
                                "Failed to update product. Please check your input and try again.",
                            );
                        }
                    }
                }
            }
        });
    }

    /// Send the staged images as one ordered batch. In edit mode the
    /// stored images are dropped first (full replacement), behind an
    /// explicit confirmation.
    pub fn submit_images(&self) {
        if self.images.with(|set| set.is_empty()) {
            dialog::alert("Please select at least one image to upload.");
            return;
        }
        let Some(product_id) = self.product_id() else {
            dialog::alert("Product ID not found. Please create the product first.");
            return;
        };
        let replace_existing = self.is_edit_mode();
        if replace_existing
            && !dialog::confirm("Replace all existing images for this product?")
        {
            return;
        }

        let records = self.images.with(|set| set.to_upload_records());
        let count = records.len();

        let vm = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if replace_existing {
                if let Err(e) = api::delete_images(product_id).await {
                    log::error!("Error deleting existing images: {}", e);
                    dialog::alert("Failed to update images. Please try again.");
                    return;
                }
                log::info!("Existing images deleted for product {}", product_id);
            }

            match api::upload_images(product_id, records).await {
                Ok(_) => {
                    dialog::alert(&format!("Successfully uploaded {} image(s)!", count));
                    vm.images.update(|set| set.clear());
                    vm.mark_done();
                }
                Err(e) => {
                    log::error!("Error uploading images: {}", e);
                    dialog::alert("Failed to upload images. Please try again.");
                }
            }
        });
    }

    /// Blank every field and drop the staged images (create mode only).
    pub fn reset_form(&self) {
        self.form.set(ProductFormData::default());
        self.attribute_rows.set(vec![AttributeRowSignals::empty()]);
        self.images.update(|set| set.clear());
        self.error.set(None);
        dialog::alert("Form data has been reset.");
    }

    pub fn add_attribute_row(&self) {
        self.attribute_rows
            .update(|rows| rows.push(AttributeRowSignals::empty()));
    }

    /// Drop a row; the last remaining row stays so the section is never
    /// empty.
    pub fn remove_attribute_row(&self, index: usize) {
        self.attribute_rows.update(|rows| {
            if rows.len() > 1 && index < rows.len() {
                rows.remove(index);
            }
        });
    }

    /// Stage files picked through the file input. Each file is decoded
    /// once here; rejections (non-image type, duplicate name+size) are
    /// surfaced per file and do not stop the rest of the pick.
    pub fn handle_files_selected(&self, input: web_sys::HtmlInputElement) {
        let Some(file_list) = input.files() else {
            return;
        };
        let files: Vec<web_sys::File> = (0..file_list.length())
            .filter_map(|i| file_list.item(i))
            .collect();
        // Allow re-picking the same file after a remove.
        input.set_value("");

        let vm = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            for file in files {
                match read_file(&file).await {
                    Ok(image) => {
                        vm.images.update(|set| {
                            if let Err(rejection) = set.add(image) {
                                dialog::alert(&rejection.to_string());
                            }
                        });
                    }
                    Err(e) => {
                        log::error!("Error reading file {}: {}", file.name(), e);
                        dialog::alert(&format!("Failed to read file \"{}\".", file.name()));
                    }
                }
            }
        });
    }

    pub fn remove_image(&self, index: usize) {
        self.images.update(|set| {
            set.remove(index);
        });
        dialog::alert("Image removed from selection.");
    }
}

/// Pull a picked file into memory as a [`PendingImage`].
async fn read_file(file: &web_sys::File) -> Result<PendingImage, String> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("{:?}", e))?;
    let array = buffer
        .dyn_into::<js_sys::ArrayBuffer>()
        .map_err(|e| format!("{:?}", e))?;
    let bytes = js_sys::Uint8Array::new(&array).to_vec();
    Ok(PendingImage {
        name: file.name(),
        mime: file.type_(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_flow_stages() {
        let vm = ProductFormViewModel::new(None);
        assert!(vm.showing_details());
        assert!(!vm.showing_images());
        assert_eq!(vm.product_id(), None);
        assert_eq!(vm.primary_label(), "Create Product");
        assert_eq!(vm.secondary_label(), Some("Reset"));

        // Successful metadata POST exposes the server-assigned id.
        vm.mark_created(77);
        assert!(vm.showing_images());
        assert_eq!(vm.product_id(), Some(77));
        assert_eq!(vm.primary_label(), "Upload Images");
        assert_eq!(vm.secondary_label(), None);

        vm.mark_done();
        assert!(vm.is_done());
        assert_eq!(vm.primary_label(), "Back to Products");
    }

    #[test]
    fn test_edit_flow_stages() {
        let vm = ProductFormViewModel::new(Some(5));
        assert!(vm.is_edit_mode());
        assert!(vm.showing_details());
        assert_eq!(vm.product_id(), Some(5));
        assert_eq!(vm.primary_label(), "Edit Details");
        assert_eq!(vm.secondary_label(), Some("Skip Details"));

        // Short-circuit straight to the image step.
        vm.advance_to_images();
        assert!(vm.showing_images());
        assert_eq!(vm.primary_label(), "Edit Images");
        assert_eq!(vm.secondary_label(), Some("Back to Products"));
        assert_eq!(vm.product_id(), Some(5));

        vm.mark_done();
        assert!(vm.is_done());
    }

    #[test]
    fn test_advance_to_images_is_edit_only() {
        let vm = ProductFormViewModel::new(None);
        vm.advance_to_images();
        // Still in the create editing stage.
        assert!(vm.showing_details());
        assert_eq!(vm.primary_label(), "Create Product");
    }

    #[test]
    fn test_attribute_rows_keep_at_least_one() {
        let vm = ProductFormViewModel::new(None);
        vm.add_attribute_row();
        assert_eq!(vm.attribute_rows.get_untracked().len(), 2);
        vm.remove_attribute_row(0);
        assert_eq!(vm.attribute_rows.get_untracked().len(), 1);
        vm.remove_attribute_row(0);
        assert_eq!(vm.attribute_rows.get_untracked().len(), 1);
    }

    #[test]
    fn test_attribute_snapshot_reads_row_signals() {
        let vm = ProductFormViewModel::new(None);
        let row = vm.attribute_rows.get_untracked()[0];
        row.key.set("brand".to_string());
        row.value.set("Birdy".to_string());

        let snapshot = vm.attribute_snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].key, "brand");
        assert_eq!(snapshot[0].value, "Birdy");
    }
}
