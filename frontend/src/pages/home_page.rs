use dioxus::prelude::*;

use crate::components::filter_components::filter_form::FilterForm;
use crate::data_definitions::search_params::SearchParams;
use crate::routes::Route;

/// Home page
#[component]
pub fn HomePage(query: SearchParams) -> Element {
    rsx! {
        Title { "Recherche de biens" }
        div {
            id: "x-home-container",
            class: "ff-home",
            h1 { class: "ff-home-title", "Trouvez le lieu de votre projet" }
            p {
                class: "ff-home-subtitle",
                "Type de lieu, architecture, décoration, pièces : combinez les filtres puis lancez la recherche."
            }
            FilterForm { class: "ff-form-hero".to_string() }
            if !query.0.is_empty() {
                Link {
                    to: Route::results_page_from_request(query.0.clone()),
                    class: "ff-home-plan-link",
                    "Voir les critères de la recherche en cours"
                }
            }
        }
    }
}
