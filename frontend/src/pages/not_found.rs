use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div class="not-found">
            <h1>{"Nothing here"}</h1>
            <p>{"That page wandered off."}</p>
            <Link<Route> to={Route::Home} classes="hero-cta">
                {"Back to the start"}
            </Link<Route>>
        </div>
    }
}
