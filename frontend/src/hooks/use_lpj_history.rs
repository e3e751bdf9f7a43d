use shared::LpjHistoryItem;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::{ApiClient, ApiError};
use crate::services::download::save_binary_file;

pub struct UseLpjHistoryResult {
    pub history: Vec<LpjHistoryItem>,
    pub loading: bool,
    /// Terminal error replacing the table
    pub error: Option<String>,
    /// Non-fatal download failure, shown alongside the table
    pub download_error: Option<String>,
    /// Attachment name currently being fetched, if any
    pub downloading: Option<String>,
    pub download: Callback<String>,
}

/// Fetch the document history once on mount and expose a per-row download
/// action. A fetch still in flight when the view unmounts has its result
/// discarded rather than cancelled.
#[hook]
pub fn use_lpj_history(api_client: &ApiClient) -> UseLpjHistoryResult {
    let history = use_state(Vec::<LpjHistoryItem>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let download_error = use_state(|| None::<String>);
    let downloading = use_state(|| None::<String>);

    {
        let api_client = api_client.clone();
        let history = history.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_effect_with((), move |_| {
            let unmounted = Rc::new(Cell::new(false));
            let flag = unmounted.clone();

            spawn_local(async move {
                match api_client.fetch_history().await {
                    Ok(items) => {
                        if !flag.get() {
                            history.set(items);
                        }
                    }
                    Err(e) => {
                        gloo::console::error!("Error fetching LPJ history:", e.to_string());
                        if !flag.get() {
                            let message = match e {
                                ApiError::Status(status) => format!(
                                    "Failed to load LPJ history. Server responded with: {}",
                                    status
                                ),
                                _ => "Failed to load LPJ history.".to_string(),
                            };
                            error.set(Some(message));
                        }
                    }
                }
                if !flag.get() {
                    loading.set(false);
                }
            });

            move || unmounted.set(true)
        });
    }

    let download = {
        let api_client = api_client.clone();
        let download_error = download_error.clone();
        let downloading = downloading.clone();

        Callback::from(move |filename: String| {
            if downloading.is_some() {
                return;
            }

            let api_client = api_client.clone();
            let download_error = download_error.clone();
            let downloading = downloading.clone();

            downloading.set(Some(filename.clone()));
            spawn_local(async move {
                match api_client.download_document(&filename).await {
                    Ok(bytes) => {
                        download_error.set(None);
                        if let Err(e) = save_binary_file(&bytes, &filename, "application/pdf") {
                            gloo::console::error!("Failed to start download:", e);
                            download_error
                                .set(Some(format!("Failed to download {}.", filename)));
                        }
                    }
                    Err(e) => {
                        gloo::console::error!("Error downloading document:", e.to_string());
                        download_error.set(Some(format!("Failed to download {}.", filename)));
                    }
                }
                downloading.set(None);
            });
        })
    };

    UseLpjHistoryResult {
        history: (*history).clone(),
        loading: *loading,
        error: (*error).clone(),
        download_error: (*download_error).clone(),
        downloading: (*downloading).clone(),
        download,
    }
}
