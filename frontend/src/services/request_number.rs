use shared::generate_request_number;

/// Generate a request number from the browser clock and Math.random.
pub fn new_request_number() -> String {
    let epoch_millis = js_sys::Date::now() as u64;
    let entropy = (js_sys::Math::random() * 10_000.0) as u32;
    generate_request_number(epoch_millis, entropy)
}
