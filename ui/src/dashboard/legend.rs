use dioxus::prelude::*;

use crate::data::Component;

use super::labels::component_label;

#[component]
pub fn Legend() -> Element {
    rsx! {
        div { class: "legend",
            for component in Component::ALL {
                div { key: "{component.key()}", class: "legend__item",
                    span {
                        class: "legend__swatch",
                        style: "background-color: {component.color()}",
                    }
                    span { class: "legend__label", {component_label(component)} }
                }
            }
        }
    }
}
