use log::error;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::config::{self, MotionConfig};
use crate::motion::driver;
use crate::motion::ticker::{layer_words, TickerVariant};
use crate::surface::dom::DomSurface;
use crate::Route;

struct Pillar {
    title: &'static str,
    body: &'static str,
}

const PILLARS: [Pillar; 7] = [
    Pillar { title: "Capture", body: "Jot it down the moment it shows up, from any device." },
    Pillar { title: "Organize", body: "Boards, tags and links that bend to how you already think." },
    Pillar { title: "Share", body: "Invite classmates or coworkers into a page with one link." },
    Pillar { title: "Plan", body: "Turn loose notes into goals with dates and owners." },
    Pillar { title: "Connect", body: "Backlinks surface the ideas you forgot were related." },
    Pillar { title: "Create", body: "Drafts, sketches and outlines live next to each other." },
    Pillar { title: "Learn", body: "Spaced review brings old notes back when they matter." },
];

const STYLES: &str = r#"
    .ticker-stack {
        display: flex;
        flex-direction: column;
        gap: 0.5rem;
        margin: 3rem 0;
    }
    .ticker-window {
        overflow: hidden;
        width: 100%;
    }
    .ticker-layer {
        display: flex;
        gap: 2rem;
        white-space: nowrap;
        will-change: transform;
    }
    .scroller-item {
        font-size: 3rem;
        opacity: 0.35;
        min-width: 12rem;
        text-align: center;
    }
    .scroller-item.highlighted {
        opacity: 1;
        color: #667eea;
        transform: scale(1.08);
    }
    .popup-anchor {
        position: relative;
        display: inline-block;
    }
    .popup {
        display: none;
        position: absolute;
        top: 100%;
        left: 0;
        min-width: 12rem;
        padding: 0.75rem;
        background: #1f1f2e;
        border-radius: 0.75rem;
        z-index: 20;
    }
    .popup.active {
        display: flex;
        flex-direction: column;
    }
    .popup-anchor:hover .popup:not(.locked-closed) {
        display: flex;
        flex-direction: column;
    }
    .popup.locked-closed {
        display: none;
    }
    #pillars {
        position: relative;
    }
    .pillars-sticky {
        position: sticky;
        top: 0;
        height: 100vh;
        display: flex;
        align-items: center;
        gap: 3rem;
    }
    .pillars-timeline {
        position: relative;
        height: 100%;
        width: 4px;
    }
    .pillars-timeline-line {
        position: absolute;
        top: calc(50% - 10rem);
        height: 20rem;
        width: 100%;
        background: rgba(255, 255, 255, 0.15);
    }
    .pillars-timeline-indicator {
        position: absolute;
        top: calc(50% - 10rem);
        left: -6px;
        width: 16px;
        height: 16px;
        border-radius: 50%;
        background: rgba(102, 126, 234, 1);
        transition: top 0.4s ease, background 0.4s ease;
    }
    .pillar-cards {
        position: relative;
        flex: 1;
        height: 20rem;
    }
    .pillar-content-card {
        position: absolute;
        inset: 0;
        opacity: 0;
        transform: translateY(1rem);
        transition: opacity 0.4s ease, transform 0.4s ease;
    }
    .pillar-content-card.active {
        opacity: 1;
        transform: none;
    }
    .pillar-spacer {
        height: 60vh;
    }
"#;

#[derive(Properties, PartialEq)]
pub struct LandingProps {
    pub variant: TickerVariant,
}

fn ticker_layer(class: &str, id: Option<&str>, words: Vec<String>) -> Html {
    html! {
        <div class="ticker-window">
            <div class={classes!("ticker-layer", class.to_string())} id={id.map(str::to_string)}>
                { for words.into_iter().map(|word| html! {
                    <div class="scroller-item" data-word={word.clone()}>{word}</div>
                }) }
            </div>
        </div>
    }
}

fn ticker(variant: TickerVariant, config: &MotionConfig) -> Html {
    let presets = config.ticker.presets_for(variant);
    match variant {
        TickerVariant::Layered => html! {
            <div class="ticker-stack">
                { for (0..4).map(|i| ticker_layer(&format!("layer{}", i + 1), None, layer_words(presets, i))) }
            </div>
        },
        TickerVariant::Classic => html! {
            <div class="ticker-stack classic">
                <span class="ticker-lead">{"Notes for people who"}</span>
                { ticker_layer("single", Some("ticker"), layer_words(presets, 0)) }
            </div>
        },
    }
}

fn popup_menu(name: &'static str, label: &'static str, links: &[(&'static str, &'static str)]) -> Html {
    html! {
        <div class="popup-anchor">
            <button class={classes!("nav-button", format!("{}-button", name))}>{label}</button>
            <div class={classes!("popup", format!("{}-popup", name))}>
                { for links.iter().map(|(text, href)| html! {
                    <a class="popup-link" href={*href}>{*text}</a>
                }) }
            </div>
        </div>
    }
}

#[function_component(Landing)]
pub fn landing(props: &LandingProps) -> Html {
    let config = use_memo(
        |_| DomSurface::new().map(|surface| config::load(&surface)).unwrap_or_default(),
        (),
    );

    {
        let config = config.clone();
        use_effect_with_deps(
            move |variant| {
                if let Some(window) = web_sys::window() {
                    window.scroll_to_with_x_and_y(0.0, 0.0);
                }
                let behaviors = match driver::mount(*variant, &config) {
                    Ok(behaviors) => Some(behaviors),
                    Err(e) => {
                        error!("Motion behaviors not mounted: {}", e);
                        None
                    }
                };
                move || drop(behaviors)
            },
            props.variant,
        );
    }

    html! {
        <div class="landing-page">
            <header class="hero">
                <h1 class="hero-title">{"Notes that keep up with you"}</h1>
                { ticker(props.variant, &config) }
                <div class="hero-cta-group">
                    <a href="#pillars" class="hero-cta">{"See how it works"}</a>
                    {
                        match props.variant {
                            TickerVariant::Layered => html! {
                                <Link<Route> to={Route::Classic} classes="variant-link">{"Classic ticker"}</Link<Route>>
                            },
                            TickerVariant::Classic => html! {
                                <Link<Route> to={Route::Home} classes="variant-link">{"Layered ticker"}</Link<Route>>
                            },
                        }
                    }
                </div>
            </header>

            <section class="explore-bar">
                { popup_menu("community", "Community", &[("Forum", "/community/forum"), ("Events", "/community/events"), ("Showcase", "/community/showcase")]) }
                { popup_menu("explore", "Explore", &[("Templates", "/explore/templates"), ("Integrations", "/explore/integrations")]) }
                { popup_menu("resources", "Resources", &[("Guides", "/resources/guides"), ("Changelog", "/resources/changelog"), ("Help", "/resources/help")]) }
            </section>

            <section id="pillars">
                <div class="pillars-sticky">
                    <div class="pillars-timeline">
                        <div class="pillars-timeline-line"></div>
                        <div class="pillars-timeline-indicator"></div>
                    </div>
                    <div class="pillar-cards">
                        { for PILLARS.iter().map(|pillar| html! {
                            <article class="pillar-content-card">
                                <h3>{pillar.title}</h3>
                                <p>{pillar.body}</p>
                            </article>
                        }) }
                    </div>
                </div>
                { for PILLARS.iter().map(|_| html! { <div class="pillar-spacer"></div> }) }
            </section>

            <footer class="landing-footer">
                <p>{"Made for students, teams, makers and thinkers."}</p>
            </footer>

            <style>{STYLES}</style>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::STYLES;

    #[test]
    fn hovering_the_anchor_keeps_a_popup_reachable() {
        // the button's mouseleave closes a hover preview, so the popup must
        // stay visible while the pointer is anywhere inside its anchor
        assert!(STYLES.contains(".popup-anchor:hover .popup:not(.locked-closed)"));
        assert!(STYLES.contains(".popup.locked-closed"));
    }
}
