use shared::{LpjDraft, RincianDraft, RincianField, ScalarField};
use std::collections::{BTreeMap, BTreeSet};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LpjFormProps {
    // Form state
    pub draft: LpjDraft,
    pub errors: BTreeMap<String, String>,
    pub touched: BTreeSet<String>,
    pub submitting: bool,
    pub progress_message: Option<String>,
    pub form_error: Option<String>,
    pub form_success: bool,

    // Event handlers
    pub on_scalar_change: Callback<(ScalarField, String)>,
    pub on_scalar_blur: Callback<ScalarField>,
    pub on_item_change: Callback<(usize, RincianField, String)>,
    pub on_item_blur: Callback<(usize, RincianField)>,
    pub on_add_row: Callback<()>,
    pub on_remove_row: Callback<usize>,
    pub on_submit: Callback<()>,
}

#[function_component(LpjForm)]
pub fn lpj_form(props: &LpjFormProps) -> Html {
    let onsubmit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let on_add = {
        let on_add_row = props.on_add_row.clone();
        Callback::from(move |_| on_add_row.emit(()))
    };

    html! {
        <section class="lpj-form-section">
            <h2>{"LPJ Form"}</h2>

            {if let Some(message) = props.progress_message.as_ref() {
                html! {
                    <div class="form-message info">
                        {message}
                    </div>
                }
            } else { html! {} }}

            {if let Some(error) = props.form_error.as_ref() {
                html! {
                    <div class="form-message error">
                        {error}
                    </div>
                }
            } else { html! {} }}

            {if props.form_success {
                html! {
                    <div class="form-message success">
                        {"LPJ document generated successfully!"}
                    </div>
                }
            } else { html! {} }}

            <form class="lpj-form" onsubmit={onsubmit}>
                <div class="form-group">
                    <label for="no_request">{"No Request"}</label>
                    <input
                        type="text"
                        id="no_request"
                        value={props.draft.no_request.clone()}
                        readonly={true}
                    />
                </div>

                <div class="form-grid">
                    { for ScalarField::ALL.iter().map(|field| render_scalar_field(props, *field)) }
                </div>

                <h3>{"Rincian Keperluan PUM dan LPJ"}</h3>

                { for props.draft.rincian_items.iter().enumerate().map(|(index, item)| {
                    render_rincian_row(props, index, item)
                }) }

                <button
                    type="button"
                    class="btn btn-outline add-item-btn"
                    onclick={on_add}
                    disabled={props.submitting}
                >
                    {"Add Item"}
                </button>

                <div class="form-grid totals">
                    <div class="form-group">
                        <label for="total_pum">{"Total PUM"}</label>
                        <input
                            type="text"
                            id="total_pum"
                            value={props.draft.total_pum.to_string()}
                            readonly={true}
                        />
                    </div>
                    <div class="form-group">
                        <label for="total_lpj">{"Total LPJ"}</label>
                        <input
                            type="text"
                            id="total_lpj"
                            value={props.draft.total_lpj.to_string()}
                            readonly={true}
                        />
                    </div>
                </div>

                <button
                    type="submit"
                    class="btn btn-primary generate-btn"
                    disabled={props.submitting}
                >
                    {if props.submitting {
                        "Generating LPJ..."
                    } else {
                        "Generate LPJ"
                    }}
                </button>
            </form>
        </section>
    }
}

fn render_scalar_field(props: &LpjFormProps, field: ScalarField) -> Html {
    let oninput = {
        let on_scalar_change = props.on_scalar_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_scalar_change.emit((field, input.value()));
        })
    };
    let onblur = {
        let on_scalar_blur = props.on_scalar_blur.clone();
        Callback::from(move |_: FocusEvent| on_scalar_blur.emit(field))
    };
    let error = if props.touched.contains(field.name()) {
        props.errors.get(field.name())
    } else {
        None
    };

    html! {
        <div class="form-group">
            <label for={field.name()}>{field.label()}</label>
            <input
                type={field.input_type()}
                id={field.name()}
                value={field.get(&props.draft).to_string()}
                oninput={oninput}
                onblur={onblur}
                disabled={props.submitting}
            />
            {if let Some(message) = error {
                html! { <div class="field-error">{message}</div> }
            } else { html! {} }}
        </div>
    }
}

fn render_rincian_row(props: &LpjFormProps, index: usize, item: &RincianDraft) -> Html {
    let remove_disabled = props.draft.rincian_items.len() == 1 || props.submitting;
    let on_remove = {
        let on_remove_row = props.on_remove_row.clone();
        Callback::from(move |_| on_remove_row.emit(index))
    };

    html! {
        <div class="rincian-row" key={item.id.to_string()}>
            <div class="form-group rincian-no">
                <label>{"No"}</label>
                <input type="text" value={(index + 1).to_string()} readonly={true} />
            </div>
            { render_item_field(props, index, RincianField::DeskripsiPum, &item.deskripsi_pum) }
            { render_item_field(props, index, RincianField::JumlahPum, &item.jumlah_pum) }
            { render_item_field(props, index, RincianField::DeskripsiLpj, &item.deskripsi_lpj) }
            { render_item_field(props, index, RincianField::JumlahLpj, &item.jumlah_lpj) }
            <button
                type="button"
                class="btn remove-item-btn"
                onclick={on_remove}
                disabled={remove_disabled}
            >
                {"Remove"}
            </button>
        </div>
    }
}

fn render_item_field(
    props: &LpjFormProps,
    index: usize,
    field: RincianField,
    value: &str,
) -> Html {
    let is_amount = matches!(field, RincianField::JumlahPum | RincianField::JumlahLpj);
    let path = field.path(index);

    let oninput = {
        let on_item_change = props.on_item_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_item_change.emit((index, field, input.value()));
        })
    };
    let onblur = {
        let on_item_blur = props.on_item_blur.clone();
        Callback::from(move |_: FocusEvent| on_item_blur.emit((index, field)))
    };
    let error = if props.touched.contains(&path) {
        props.errors.get(&path)
    } else {
        None
    };

    html! {
        <div class="form-group">
            <label>{field.label()}</label>
            <input
                type={if is_amount { "number" } else { "text" }}
                min={is_amount.then(|| AttrValue::from("0"))}
                step={is_amount.then(|| AttrValue::from("0.01"))}
                value={value.to_string()}
                oninput={oninput}
                onblur={onblur}
                disabled={props.submitting}
            />
            {if let Some(message) = error {
                html! { <div class="field-error">{message}</div> }
            } else { html! {} }}
        </div>
    }
}
