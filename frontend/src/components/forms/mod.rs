pub mod lpj_form;

pub use lpj_form::LpjForm;
