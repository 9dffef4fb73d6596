mod api;
mod components;
mod dom;
mod pages;

use dioxus::prelude::*;

const CSS: Asset = asset!("/assets/main.css");

#[allow(non_snake_case)]
fn App() -> Element {
    rsx! {
        document::Stylesheet { href: CSS }
        pages::home::Home {}
    }
}

fn main() {
    launch(App);
}
