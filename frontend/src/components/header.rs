use yew::prelude::*;

use crate::View;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub current_view: View,
    pub on_navigate: Callback<View>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let nav_button = |target: View, label: &'static str| -> Html {
        let onclick = {
            let on_navigate = props.on_navigate.clone();
            Callback::from(move |_| on_navigate.emit(target))
        };
        let class = if props.current_view == target {
            "nav-btn active"
        } else {
            "nav-btn"
        };
        html! {
            <button class={class} onclick={onclick}>{label}</button>
        }
    };

    html! {
        <header class="header">
            <div class="container">
                <h1>{"LPJ Tracker"}</h1>
                <nav class="view-nav">
                    { nav_button(View::Form, "Add Form") }
                    { nav_button(View::History, "History") }
                </nav>
            </div>
        </header>
    }
}
