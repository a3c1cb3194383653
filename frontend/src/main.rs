use yew::prelude::*;
use yew_router::prelude::*;
use log::{error, info, Level};

mod config;
mod error;
mod surface;
mod motion {
    pub mod driver;
    pub mod menu;
    pub mod pillars;
    pub mod popups;
    pub mod ticker;
}
mod pages {
    pub mod landing;
    pub mod not_found;
}

use motion::ticker::TickerVariant;
use pages::{
    landing::Landing,
    not_found::NotFound,
};


#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/classic")]
    Classic,
    #[not_found]
    #[at("/404")]
    NotFound,
}


fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Landing variant={TickerVariant::Layered} /> }
        },
        Route::Classic => {
            info!("Rendering Classic page");
            html! { <Landing variant={TickerVariant::Classic} /> }
        },
        Route::NotFound => {
            info!("Rendering NotFound page");
            html! { <NotFound /> }
        },
    }
}


// The hamburger's open state is owned by the menu toggle behavior, not by Yew,
// so the markup here stays static.
#[function_component(Nav)]
pub fn nav() -> Html {
    use_effect_with_deps(
        |_| {
            let menu = match motion::driver::mount_menu() {
                Ok(menu) => Some(menu),
                Err(e) => {
                    error!("Menu toggle not mounted: {}", e);
                    None
                }
            };
            move || drop(menu)
        },
        (),
    );

    html! {
        <nav class="top-nav">
            <div class="nav-content">
                <Link<Route> to={Route::Home} classes="nav-logo">
                    {"notewave"}
                </Link<Route>>

                <button class="hamburger" aria-label="Open menu">
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <div class="mobile-menu">
                    <Link<Route> to={Route::Home} classes="nav-link">
                        {"Home"}
                    </Link<Route>>
                    <Link<Route> to={Route::Classic} classes="nav-link">
                        {"Classic"}
                    </Link<Route>>
                    <a href="#pillars" class="nav-link">{"How it works"}</a>
                </div>
            </div>
        </nav>
    }
}


#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <Nav />
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}


fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) { Level::Debug } else { Level::Info };
    console_log::init_with_level(level).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
