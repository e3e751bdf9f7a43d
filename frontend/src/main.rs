use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::forms::LpjForm;
use components::history::HistoryTable;
use components::Header;
use hooks::{use_lpj_form, use_lpj_history, use_request_number_refresh, RequestNumberRefreshConfig};
use services::api::ApiClient;

/// Views available in the main interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Form,
    History,
}

#[function_component(App)]
fn app() -> Html {
    let view = use_state(|| View::Form);
    let api_client = use_memo((), |_| ApiClient::new());

    // The form hook lives here so a detour through History keeps the draft
    let form = use_lpj_form(&api_client);
    use_request_number_refresh(
        RequestNumberRefreshConfig::default(),
        form.actions.regenerate_request_number.clone(),
        form.state.draft.is_edited() || form.state.submitting,
    );

    let on_navigate = {
        let view = view.clone();
        Callback::from(move |next: View| view.set(next))
    };

    html! {
        <>
            <Header current_view={*view} on_navigate={on_navigate} />

            <main class="main">
                <div class="container">
                    {match *view {
                        View::Form => html! {
                            <LpjForm
                                draft={form.state.draft.clone()}
                                errors={form.state.errors.clone()}
                                touched={form.state.touched.clone()}
                                submitting={form.state.submitting}
                                progress_message={form.state.progress_message.clone()}
                                form_error={form.state.form_error.clone()}
                                form_success={form.state.form_success}
                                on_scalar_change={form.actions.on_scalar_change.clone()}
                                on_scalar_blur={form.actions.on_scalar_blur.clone()}
                                on_item_change={form.actions.on_item_change.clone()}
                                on_item_blur={form.actions.on_item_blur.clone()}
                                on_add_row={form.actions.add_row.clone()}
                                on_remove_row={form.actions.remove_row.clone()}
                                on_submit={form.actions.submit.clone()}
                            />
                        },
                        View::History => html! {
                            <HistoryView api_client={(*api_client).clone()} />
                        },
                    }}
                </div>
            </main>
        </>
    }
}

#[derive(Properties, PartialEq)]
struct HistoryViewProps {
    api_client: ApiClient,
}

/// Mounted only while the History tab is active, so every entry refetches.
#[function_component(HistoryView)]
fn history_view(props: &HistoryViewProps) -> Html {
    let history = use_lpj_history(&props.api_client);

    html! {
        <HistoryTable
            history={history.history.clone()}
            loading={history.loading}
            error={history.error.clone()}
            download_error={history.download_error.clone()}
            downloading={history.downloading.clone()}
            on_download={history.download.clone()}
        />
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
