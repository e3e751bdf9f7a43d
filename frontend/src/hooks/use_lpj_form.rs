use gloo::timers::future::TimeoutFuture;
use shared::{LpjDraft, RincianField, ScalarField};
use std::collections::{BTreeMap, BTreeSet};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::date_utils::get_current_date;
use crate::services::download::save_binary_file;
use crate::services::request_number::new_request_number;

/// Fixed download name for the generated document
const DOWNLOAD_FILENAME: &str = "LPJ_PUM.pdf";

/// How long the success flash stays visible
const SUCCESS_FLASH_MS: u32 = 3000;

#[derive(Clone)]
pub struct LpjFormState {
    pub draft: LpjDraft,
    /// Current validation errors by field path, recomputed on every edit
    pub errors: BTreeMap<String, String>,
    /// Field paths that have been blurred; errors display only for these
    pub touched: BTreeSet<String>,
    pub submitting: bool,
    pub progress_message: Option<String>,
    pub form_error: Option<String>,
    pub form_success: bool,
}

#[derive(Clone)]
pub struct UseLpjFormActions {
    pub on_scalar_change: Callback<(ScalarField, String)>,
    pub on_scalar_blur: Callback<ScalarField>,
    pub on_item_change: Callback<(usize, RincianField, String)>,
    pub on_item_blur: Callback<(usize, RincianField)>,
    pub add_row: Callback<()>,
    pub remove_row: Callback<usize>,
    pub regenerate_request_number: Callback<()>,
    pub submit: Callback<()>,
}

pub struct UseLpjFormResult {
    pub state: LpjFormState,
    pub actions: UseLpjFormActions,
}

/// Form state and submission pipeline for the LPJ form.
///
/// Owns the draft session, touched-field tracking, and the
/// Idle -> Submitting -> Idle state machine: success resets to a fresh draft
/// with a new request number, failure keeps the user's input for a retry.
#[hook]
pub fn use_lpj_form(api_client: &ApiClient) -> UseLpjFormResult {
    let draft = use_state(|| LpjDraft::new(new_request_number(), get_current_date()));
    let touched = use_state(BTreeSet::<String>::new);
    let submitting = use_state(|| false);
    let progress_message = use_state(|| None::<String>);
    let form_error = use_state(|| None::<String>);
    let form_success = use_state(|| false);

    let on_scalar_change = {
        let draft = draft.clone();
        Callback::from(move |(field, value): (ScalarField, String)| {
            let mut next = (*draft).clone();
            next.set_scalar(field, value);
            draft.set(next);
        })
    };

    let on_scalar_blur = {
        let touched = touched.clone();
        Callback::from(move |field: ScalarField| {
            let mut next = (*touched).clone();
            next.insert(field.name().to_string());
            touched.set(next);
        })
    };

    let on_item_change = {
        let draft = draft.clone();
        Callback::from(move |(index, field, value): (usize, RincianField, String)| {
            let mut next = (*draft).clone();
            next.set_item_field(index, field, value);
            draft.set(next);
        })
    };

    let on_item_blur = {
        let touched = touched.clone();
        Callback::from(move |(index, field): (usize, RincianField)| {
            let mut next = (*touched).clone();
            next.insert(field.path(index));
            touched.set(next);
        })
    };

    let add_row = {
        let draft = draft.clone();
        Callback::from(move |_| {
            let mut next = (*draft).clone();
            next.add_row();
            draft.set(next);
        })
    };

    let remove_row = {
        let draft = draft.clone();
        Callback::from(move |index: usize| {
            let mut next = (*draft).clone();
            if next.remove_row(index) {
                draft.set(next);
            }
        })
    };

    // Silent regeneration while the session is idle; a draft the user has
    // touched, or one mid-submit, keeps its number.
    let regenerate_request_number = {
        let draft = draft.clone();
        let submitting = submitting.clone();
        Callback::from(move |_| {
            if draft.is_edited() || *submitting {
                return;
            }
            let mut next = (*draft).clone();
            next.replace_request_number(new_request_number());
            draft.set(next);
        })
    };

    let submit = {
        let api_client = api_client.clone();
        let draft = draft.clone();
        let touched = touched.clone();
        let submitting = submitting.clone();
        let progress_message = progress_message.clone();
        let form_error = form_error.clone();
        let form_success = form_success.clone();

        Callback::from(move |_| {
            if *submitting {
                return;
            }

            let current = (*draft).clone();
            let validation_errors = current.validate();
            if !validation_errors.is_empty() {
                // Reveal every failing field, not just the blurred ones
                let mut next_touched = (*touched).clone();
                next_touched.extend(validation_errors.keys().cloned());
                touched.set(next_touched);
                form_error.set(Some(
                    "Please fix the highlighted fields before submitting.".to_string(),
                ));
                return;
            }

            let api_client = api_client.clone();
            let draft = draft.clone();
            let touched = touched.clone();
            let submitting = submitting.clone();
            let progress_message = progress_message.clone();
            let form_error = form_error.clone();
            let form_success = form_success.clone();

            spawn_local(async move {
                form_error.set(None);
                form_success.set(false);
                submitting.set(true);
                progress_message.set(Some("Generating LPJ document...".to_string()));

                let request = current.to_request();
                match api_client.generate_lpj(&request).await {
                    Ok(bytes) => {
                        progress_message
                            .set(Some("Document generated. Preparing download...".to_string()));
                        if let Err(e) =
                            save_binary_file(&bytes, DOWNLOAD_FILENAME, "application/pdf")
                        {
                            gloo::console::error!("Failed to start download:", e);
                        }

                        draft.set(LpjDraft::new(new_request_number(), get_current_date()));
                        touched.set(BTreeSet::new());
                        form_error.set(None);
                        form_success.set(true);

                        let form_success_clear = form_success.clone();
                        spawn_local(async move {
                            TimeoutFuture::new(SUCCESS_FLASH_MS).await;
                            form_success_clear.set(false);
                        });
                    }
                    Err(e) => {
                        gloo::console::error!("Error generating document:", e.to_string());
                        form_error.set(Some(
                            "An error occurred while generating the document. Please try again."
                                .to_string(),
                        ));
                    }
                }

                progress_message.set(None);
                submitting.set(false);
            });
        })
    };

    UseLpjFormResult {
        state: LpjFormState {
            errors: draft.validate(),
            draft: (*draft).clone(),
            touched: (*touched).clone(),
            submitting: *submitting,
            progress_message: (*progress_message).clone(),
            form_error: (*form_error).clone(),
            form_success: *form_success,
        },
        actions: UseLpjFormActions {
            on_scalar_change,
            on_scalar_blur,
            on_item_change,
            on_item_blur,
            add_row,
            remove_row,
            regenerate_request_number,
            submit,
        },
    }
}
