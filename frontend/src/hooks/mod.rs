pub mod use_lpj_form;
pub mod use_lpj_history;
pub mod use_request_number_refresh;

pub use use_lpj_form::{use_lpj_form, LpjFormState, UseLpjFormActions, UseLpjFormResult};
pub use use_lpj_history::{use_lpj_history, UseLpjHistoryResult};
pub use use_request_number_refresh::{use_request_number_refresh, RequestNumberRefreshConfig};
