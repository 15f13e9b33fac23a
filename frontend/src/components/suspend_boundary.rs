use dioxus::prelude::*;

use crate::components::error_boundary::ComponentErrorBoundary;

#[component]
pub fn SuspendWrapper(children: Element) -> Element {
    rsx! {
        SuspenseBoundary {
            // shown while the settings or the catalog are still on their way
            fallback: |_s: SuspenseContext| rsx! {
                LoadingIndicator {}
            },
            ComponentErrorBoundary {
                children
            }
        }
    }
}

#[component]
pub fn LoadingIndicator() -> Element {
    rsx! {
        div {
            class: "ff-loading",
            "Chargement..."
        }
    }
}
