use shared::LpjHistoryItem;
use yew::prelude::*;

use crate::services::date_utils::format_history_date;

#[derive(Properties, PartialEq)]
pub struct HistoryTableProps {
    pub history: Vec<LpjHistoryItem>,
    pub loading: bool,
    pub error: Option<String>,
    pub download_error: Option<String>,
    pub downloading: Option<String>,
    pub on_download: Callback<String>,
}

#[function_component(HistoryTable)]
pub fn history_table(props: &HistoryTableProps) -> Html {
    if props.loading {
        return html! { <div class="loading">{"Loading LPJ history..."}</div> };
    }

    if let Some(error) = props.error.as_ref() {
        return html! {
            <div class="form-message error">
                {error}
            </div>
        };
    }

    html! {
        <section class="history-section">
            <h2>{"LPJ History"}</h2>

            {if let Some(error) = props.download_error.as_ref() {
                html! {
                    <div class="form-message error">
                        {error}
                    </div>
                }
            } else { html! {} }}

            <div class="table-container">
                <table class="history-table">
                    <thead>
                        <tr>
                            <th>{"No"}</th>
                            <th>{"No. Request"}</th>
                            <th>{"Date"}</th>
                            <th>{"Created"}</th>
                            <th>{"Actions"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {if props.history.is_empty() {
                            html! {
                                <tr>
                                    <td colspan="5" class="empty">{"No Data History"}</td>
                                </tr>
                            }
                        } else {
                            props.history.iter().enumerate().map(|(index, item)| {
                                render_row(props, index, item)
                            }).collect::<Html>()
                        }}
                    </tbody>
                </table>
            </div>
        </section>
    }
}

fn render_row(props: &HistoryTableProps, index: usize, item: &LpjHistoryItem) -> Html {
    let filename = item.filename().to_string();
    let is_downloading = props.downloading.as_deref() == Some(filename.as_str());
    let onclick = {
        let on_download = props.on_download.clone();
        let filename = filename.clone();
        Callback::from(move |_| on_download.emit(filename.clone()))
    };

    html! {
        <tr key={item.id.to_string()}>
            <td>{index + 1}</td>
            <td>{&item.no_request}</td>
            <td>{format_history_date(&item.tgl_lpj)}</td>
            <td>{format_history_date(&item.created_at)}</td>
            <td>
                <button
                    class="btn download-btn"
                    onclick={onclick}
                    disabled={props.downloading.is_some()}
                >
                    {if is_downloading { "Downloading..." } else { "Download" }}
                </button>
            </td>
        </tr>
    }
}
