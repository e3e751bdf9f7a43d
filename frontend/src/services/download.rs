use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Save a binary response body as a client-side file by pointing a temporary
/// anchor at an object URL. The object URL is revoked before returning, on
/// success and on error alike.
pub fn save_binary_file(bytes: &[u8], filename: &str, mime: &str) -> Result<(), String> {
    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));

    let options = BlobPropertyBag::new();
    options.set_type(mime);

    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| format!("Failed to create blob: {:?}", e))?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let result = trigger_download(&url, filename);
    let _ = Url::revoke_object_url(&url);
    result
}

fn trigger_download(url: &str, filename: &str) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| "No document available".to_string())?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into()
        .map_err(|_| "Element was not an anchor".to_string())?;

    anchor.set_href(url);
    anchor.set_download(filename);
    anchor.click();
    Ok(())
}
