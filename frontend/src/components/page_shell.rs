//! Header bar shared by every page.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::md_action_icons::{MdHome, MdSearch};

use crate::components::error_boundary::GlobalErrorBoundary;
use crate::routes::Route;
use common::search_request::SearchRequest;

#[component]
pub fn PageShell() -> Element {
    rsx! {
        div {
            id: "x-page-shell",
            header {
                class: "ff-header",
                Link {
                    to: Route::HomePage { query: Default::default() },
                    class: "ff-header-link",
                    Icon { icon: MdHome, style: "width: 22px; height: 22px;" }
                    "Accueil"
                }
                Link {
                    to: Route::results_page_from_request(SearchRequest::default()),
                    class: "ff-header-link",
                    Icon { icon: MdSearch, style: "width: 22px; height: 22px;" }
                    "Recherche"
                }
            }
            main {
                class: "ff-page",
                GlobalErrorBoundary {
                    boundary_name: "Page".to_string(),
                    Outlet::<Route> {}
                }
            }
        }
    }
}
