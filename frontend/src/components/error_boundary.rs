//! Error boundaries around the filter form and the pages.

use dioxus::prelude::*;

#[component]
pub fn GlobalErrorBoundary(boundary_name: ReadSignal<String>, children: Element) -> Element {
    rsx! {
        ErrorBoundary {
            handle_error: move |err: ErrorContext| {
                rsx! {
                    div {
                        class: "ff-error ff-error-page",
                        h1 { "Erreur" }
                        p { "Zone : {boundary_name}" }
                        a { href: "/", "Retour à l'accueil" }
                        pre { "{err:#?}" }
                    }
                }
            },
            children
        }
    }
}

#[component]
pub fn ComponentErrorBoundary(children: Element) -> Element {
    rsx! {
        ErrorBoundary {
            handle_error: |err: ErrorContext| {
                let error_txt = match err.error() {
                    Some(e) => format!("{:#?}", e.0),
                    None => "Erreur inconnue".to_string(),
                };
                rsx! {
                    ComponentErrorDisplay {
                        error_txt,
                        button {
                            r#type: "button",
                            class: "ff-error-retry",
                            onclick: move |_| {
                                err.clear_errors();
                            },
                            "Réessayer"
                        }
                    }
                }
            },
            {children}
        }
    }
}

#[component]
pub fn ComponentErrorDisplay(error_txt: ReadSignal<String>, children: Element) -> Element {
    rsx! {
        div {
            class: "ff-error",
            h2 { "Les filtres n'ont pas pu être chargés" }
            pre { "{error_txt}" }
            {children}
        }
    }
}
