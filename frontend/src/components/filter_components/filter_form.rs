//! The embeddable filter form: project type, reference and location inputs,
//! one trigger per catalog facet and the submit button.

use common::{
    facet_catalog::FacetCatalog,
    facet_selection::{AfterChange, SelectionState},
    filter_settings::FilterSettings,
    search_request::{ProjectType, SearchRequest, TYPE_PROJET},
};
use dioxus::logger::tracing::info;
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_action_icons::MdSearch};

use crate::{
    api::filter_api::{get_facet_catalog, get_filter_settings, get_results_url},
    components::{
        error_boundary::ComponentErrorDisplay, filter_components::facet_trigger_strip::FacetTriggerStrip,
        suspend_boundary::SuspendWrapper,
    },
    routes::Route,
};

/// Shared by the triggers and panels of one form instance.
#[derive(Clone, Copy)]
pub(crate) struct FilterFormContext {
    pub catalog: ReadSignal<FacetCatalog>,
    pub selection: Signal<SelectionState>,
    pub submit: Callback<()>,
}

impl FilterFormContext {
    pub fn apply(&self, change: AfterChange) {
        if change == AfterChange::Submit {
            self.submit.call(());
        }
    }
}

/// Appends the filter query to the results page address.
pub fn results_target(results_url: &str, request: &SearchRequest) -> String {
    let query = request.to_query_string();
    if query.is_empty() {
        return results_url.to_string();
    }
    let separator = if results_url.contains('?') { '&' } else { '?' };
    format!("{results_url}{separator}{query}")
}

#[component]
pub fn FilterForm(class: Option<String>) -> Element {
    rsx! {
        SuspendWrapper {
            FilterFormLoader { class: class.unwrap_or_default() }
        }
    }
}

#[component]
fn FilterFormLoader(class: String) -> Element {
    let request = use_route::<Route>().current_request();
    let loaded = use_resource(move || async move {
        let settings = get_filter_settings().await?;
        let catalog = get_facet_catalog().await?;
        let results_url = get_results_url().await?;
        Ok::<_, ServerFnError>((settings, catalog, results_url))
    })
    .suspend()?
    .cloned();
    let (settings, catalog, results_url) = match loaded {
        Err(e) => return rsx! { ComponentErrorDisplay { error_txt: format!("{:#?}", e) } },
        Ok(loaded) => loaded,
    };

    rsx! {
        FilterFormBody { class, settings, catalog, results_url, request }
    }
}

#[component]
fn FilterFormBody(
    class: String,
    settings: ReadSignal<FilterSettings>,
    catalog: ReadSignal<FacetCatalog>,
    results_url: ReadSignal<String>,
    request: ReadSignal<SearchRequest>,
) -> Element {
    let mut top_fields = use_signal(|| request.read().clone());
    let mut selection = use_signal(|| {
        SelectionState::from_request(&catalog.read(), &request.read(), settings.read().enable_auto_submit)
    });
    // navigation keeps this component alive, so follow the URL by hand
    use_effect(move || {
        let request = request.read().clone();
        selection.set(SelectionState::from_request(&catalog.peek(), &request, settings.peek().enable_auto_submit));
        top_fields.set(request);
    });

    let submit = Callback::new(move |_: ()| {
        let request = selection.peek().to_request(&top_fields.peek());
        let target = results_target(&results_url.peek(), &request);
        info!("filter form submitted to {}", target);
        selection.write().close_all_panels();
        navigator().push(target);
    });
    use_context_provider(|| FilterFormContext { catalog, selection, submit });

    let form_class = if class.is_empty() { "ff-form".to_string() } else { format!("ff-form {class}") };
    let button_style = use_memo(move || {
        let settings = settings.read();
        format!(
            "--ff-button-color: {}; --ff-button-hover-color: {}; --ff-button-text-color: {};",
            settings.button_color, settings.button_hover_color, settings.button_text_color
        )
    });

    rsx! {
        form {
            class: "{form_class}",
            onsubmit: move |e| {
                e.prevent_default();
                submit(());
            },

            div {
                class: "ff-top-row",
                ProjectTypeSelect { request: top_fields }
                input {
                    r#type: "text",
                    class: "ff-text-input",
                    name: "reference",
                    placeholder: "Référence",
                    value: "{top_fields.read().reference.clone().unwrap_or_default()}",
                    oninput: move |e| {
                        top_fields.write().reference = Some(e.value()).filter(|v| !v.is_empty());
                    },
                }
                input {
                    r#type: "text",
                    class: "ff-text-input",
                    name: "location",
                    placeholder: "Localisation",
                    value: "{top_fields.read().location.clone().unwrap_or_default()}",
                    oninput: move |e| {
                        top_fields.write().location = Some(e.value()).filter(|v| !v.is_empty());
                    },
                }
            }

            FacetTriggerStrip {
                filters_per_row: settings.read().filters_per_row,
                panel_max_height: settings.read().panel_max_height,
            }

            div {
                class: "ff-submit-row",
                button {
                    r#type: "submit",
                    class: "ff-submit",
                    style: "{button_style}",
                    Icon { icon: MdSearch, style: "width: 20px; height: 20px;" }
                    "{settings.read().button_text}"
                }
            }
        }
    }
}

#[component]
fn ProjectTypeSelect(mut request: Signal<SearchRequest>) -> Element {
    let current = use_memo(move || request.read().project_type.clone());
    let unlisted = use_memo(move || match current() {
        Some(ProjectType::Unlisted(token)) => Some(token),
        _ => None,
    });

    rsx! {
        select {
            class: "ff-select",
            name: TYPE_PROJET,
            onchange: move |e| {
                let token = e.value();
                request.write().project_type = if token.is_empty() { None } else { Some(ProjectType::from_token(&token)) };
            },
            option { value: "", selected: current().is_none(), "Type de projet" }
            for project in ProjectType::KNOWN {
                option {
                    key: "{project.token()}",
                    value: "{project.token()}",
                    selected: current() == Some(project.clone()),
                    "{project.label()}"
                }
            }
            if let Some(token) = unlisted() {
                option { value: "{token}", selected: true, "{token}" }
            }
        }
    }
}
