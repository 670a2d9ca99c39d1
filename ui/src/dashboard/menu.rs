use dioxus::prelude::*;

use crate::core::SourceEntry;
use crate::t;

/// One button per configured data source; the active one is highlighted.
#[component]
pub fn InstanceMenu(
    sources: Vec<SourceEntry>,
    #[props(!optional)]
    active_url: Option<String>,
    on_select: EventHandler<String>,
) -> Element {
    rsx! {
        section { class: "instance-menu",
            h2 { class: "instance-menu__heading", {t!("menu-heading")} }
            nav { class: "button-block",
                for source in sources {
                    {source_button(source, active_url.as_deref(), on_select)}
                }
            }
        }
    }
}

fn source_button(source: SourceEntry, active: Option<&str>, on_select: EventHandler<String>) -> Element {
    let is_active = active == Some(source.url.as_str());
    let class = if is_active {
        "button-block__button button-block__button--active"
    } else {
        "button-block__button"
    };
    let label = t!("menu-source", name = source.label.as_str());
    let url = source.url.clone();

    rsx! {
        button {
            key: "{source.url}",
            r#type: "button",
            class: "{class}",
            aria_pressed: "{is_active}",
            onclick: move |_| on_select.call(url.clone()),
            "{label}"
        }
    }
}
