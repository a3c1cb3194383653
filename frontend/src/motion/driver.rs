//! Browser glue: hooks the motion components up to events, animation frames
//! and timeouts. Everything is torn down when [`Behaviors`] is dropped.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::{error, info};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget};

use crate::config::MotionConfig;
use crate::error::MotionError;
use crate::motion::menu::MenuToggle;
use crate::motion::pillars::PillarTracker;
use crate::motion::popups::PopupController;
use crate::motion::ticker::{TickerMachine, TickerVariant, Wake};
use crate::surface::dom::DomSurface;

fn now_ms() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64
}

fn report(context: &str, result: Result<(), MotionError>) {
    if let Err(e) = result {
        error!("{}: {}", context, e);
    }
}

/// Event listener that removes itself on drop.
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        event: &'static str,
        callback: impl FnMut(Event) + 'static,
    ) -> Result<Self, MotionError> {
        let callback = Closure::wrap(Box::new(callback) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Runs a [`TickerMachine`] off `requestAnimationFrame` and timeouts.
struct TickerLoop {
    surface: DomSurface,
    machine: RefCell<TickerMachine<DomSurface>>,
    frame: RefCell<Option<Closure<dyn FnMut(f64)>>>,
    frame_id: Cell<Option<i32>>,
    timer: RefCell<Option<Timeout>>,
    stopped: Cell<bool>,
}

impl TickerLoop {
    fn start(surface: DomSurface, machine: TickerMachine<DomSurface>, delay_ms: u32) -> Rc<Self> {
        let this = Rc::new(Self {
            surface,
            machine: RefCell::new(machine),
            frame: RefCell::new(None),
            frame_id: Cell::new(None),
            timer: RefCell::new(None),
            stopped: Cell::new(false),
        });

        let weak = Rc::downgrade(&this);
        *this.frame.borrow_mut() = Some(Closure::wrap(Box::new(move |_timestamp: f64| {
            if let Some(this) = weak.upgrade() {
                this.on_frame();
            }
        }) as Box<dyn FnMut(f64)>));

        let weak = Rc::downgrade(&this);
        *this.timer.borrow_mut() = Some(Timeout::new(delay_ms, move || {
            if let Some(this) = weak.upgrade() {
                info!("Starting ticker with preset 1: {}", this.machine.borrow().current_phrase());
                this.schedule(Wake::Frame);
            }
        }));
        this
    }

    fn on_frame(self: &Rc<Self>) {
        self.frame_id.set(None);
        if self.stopped.get() {
            return;
        }
        let step = self.machine.borrow_mut().frame(&self.surface, now_ms());
        self.proceed(step);
    }

    fn on_timer(self: &Rc<Self>, due: f64) {
        if self.stopped.get() {
            return;
        }
        // timeouts may fire a hair before the wall clock agrees
        let step = self.machine.borrow_mut().on_timer(&self.surface, now_ms().max(due));
        self.proceed(step);
    }

    fn proceed(self: &Rc<Self>, step: Result<Wake, MotionError>) {
        match step {
            Ok(wake) => self.schedule(wake),
            Err(e) => {
                error!("Ticker stopped: {}", e);
                self.stop();
            }
        }
    }

    fn schedule(self: &Rc<Self>, wake: Wake) {
        if self.stopped.get() {
            return;
        }
        match wake {
            Wake::Frame => {
                let frame = self.frame.borrow();
                let Some(callback) = frame.as_ref() else {
                    return;
                };
                match self
                    .surface
                    .window()
                    .request_animation_frame(callback.as_ref().unchecked_ref())
                {
                    Ok(id) => self.frame_id.set(Some(id)),
                    Err(e) => error!("requestAnimationFrame failed: {}", MotionError::from(e)),
                }
            }
            Wake::At(due) => {
                let delay = (due - now_ms()).max(0.0).ceil() as u32;
                let weak = Rc::downgrade(self);
                *self.timer.borrow_mut() = Some(Timeout::new(delay, move || {
                    if let Some(this) = weak.upgrade() {
                        this.on_timer(due);
                    }
                }));
            }
        }
    }

    fn stop(&self) {
        self.stopped.set(true);
        if let Err(e) = self.machine.borrow_mut().reset_layers(&self.surface) {
            error!("Ticker reset: {}", e);
        }
        if let Some(id) = self.frame_id.take() {
            let _ = self.surface.window().cancel_animation_frame(id);
        }
        self.timer.borrow_mut().take();
        self.frame.borrow_mut().take();
    }
}

/// Listeners and loops owned by one mounted view.
pub struct Behaviors {
    listeners: Vec<Listener>,
    ticker: Option<Rc<TickerLoop>>,
}

impl Drop for Behaviors {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.stop();
        }
        self.listeners.clear();
        info!("Motion behaviors unmounted");
    }
}

/// Mounts the landing page behaviors the current document supports. A
/// component whose elements are missing is logged and skipped, the rest
/// still run.
pub fn mount(variant: TickerVariant, config: &MotionConfig) -> Result<Behaviors, MotionError> {
    let surface = DomSurface::new()?;
    let mut behaviors = Behaviors {
        listeners: Vec::new(),
        ticker: None,
    };

    match mount_popups(&surface, config) {
        Ok(listeners) => behaviors.listeners.extend(listeners),
        Err(e) => error!("Popups not mounted: {}", e),
    }
    match mount_pillars(&surface, config) {
        Ok(listener) => behaviors.listeners.push(listener),
        Err(e) => error!("Pillar tracker not mounted: {}", e),
    }
    match TickerMachine::mount(
        &surface,
        variant.layer_selectors(),
        config.ticker.presets_for(variant),
        &config.ticker,
    ) {
        Ok(machine) => {
            behaviors.ticker = Some(TickerLoop::start(
                surface.clone(),
                machine,
                config.ticker.start_delay_ms,
            ))
        }
        Err(e) => error!("Ticker not mounted: {}", e),
    }

    gloo_console::log!(format!("Motion behaviors mounted ({} ticker)", variant));
    Ok(behaviors)
}

/// Hamburger toggle for the navigation bar, which is on every route.
pub fn mount_menu() -> Result<Behaviors, MotionError> {
    let surface = DomSurface::new()?;
    let mut behaviors = Behaviors {
        listeners: Vec::new(),
        ticker: None,
    };
    let Some(menu) = MenuToggle::mount(&surface) else {
        return Ok(behaviors);
    };

    let trigger = menu.trigger().clone();
    behaviors.listeners.push(Listener::attach(&trigger, "click", move |_| {
        if let Err(e) = menu.toggle(&surface) {
            error!("Menu toggle: {}", e);
        }
    })?);
    Ok(behaviors)
}

fn mount_popups(surface: &DomSurface, config: &MotionConfig) -> Result<Vec<Listener>, MotionError> {
    let controller = Rc::new(RefCell::new(PopupController::mount(surface, &config.popups.pairs)?));
    let pairs = controller.borrow().pairs().to_vec();
    let mut listeners = Vec::with_capacity(pairs.len() * 4 + 1);

    for (index, pair) in pairs.iter().enumerate() {
        let (c, s) = (controller.clone(), surface.clone());
        listeners.push(Listener::attach(&pair.button, "click", move |event| {
            event.stop_propagation();
            report("Popup click", c.borrow_mut().click(&s, index));
        })?);

        let (c, s) = (controller.clone(), surface.clone());
        listeners.push(Listener::attach(&pair.button, "mouseenter", move |_| {
            report("Popup hover", c.borrow_mut().hover_enter(&s, index));
        })?);

        let (c, s) = (controller.clone(), surface.clone());
        listeners.push(Listener::attach(&pair.button, "mouseleave", move |_| {
            report("Popup leave", c.borrow_mut().hover_leave(&s, index));
        })?);

        listeners.push(Listener::attach(&pair.popup, "click", |event| {
            event.stop_propagation();
        })?);
    }

    let (c, s) = (controller, surface.clone());
    listeners.push(Listener::attach(surface.document(), "click", move |_| {
        report("Popup dismiss", c.borrow_mut().dismiss_all(&s));
    })?);

    info!("Mounted {} popups", pairs.len());
    Ok(listeners)
}

fn mount_pillars(surface: &DomSurface, config: &MotionConfig) -> Result<Listener, MotionError> {
    let tracker = Rc::new(RefCell::new(PillarTracker::mount(surface, &config.pillars)?));
    tracker.borrow_mut().update(surface)?;

    let s = surface.clone();
    Listener::attach(surface.window(), "scroll", move |_| {
        if let Err(e) = tracker.borrow_mut().update(&s) {
            error!("Pillar update: {}", e);
        }
    })
}
