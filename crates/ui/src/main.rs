//#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    thread,
};

use dioxus::prelude::*;
use dioxus_desktop::{
    tao::{
        dpi::LogicalSize,
        menu::{MenuBar, MenuItem},
    },
    Config, WindowBuilder,
};
use logopad::{render, Turtle};
use logopad_lang::{Interpreter, Outcome, Pacer, SleepPacing};

const DEMO_SCRIPT: &str = "fd 100\nrt 90\nfd 80\nlt 45\npu\nfd 50\npd\nsetpensize 3\nsetpencolor 4\nhome\nclear\nrepeat 4 [ fd 50 rt 90 ]\nppt\nbye\n";

/// Asks the window to render again. Safe to call from any thread.
type Refresh = Arc<dyn Fn() + Send + Sync>;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Default)]
struct Session {
    turtle: Turtle,
    interp: Interpreter,
}

/// The last picture of the turtle, kept apart from the session so that the window can show it
/// while a script is still running.
#[derive(Default)]
struct Canvas {
    // The turtle frame that `svg` was rendered from.
    frame: Option<u64>,
    svg: String,
}

impl Canvas {
    /// Renders the turtle again if it changed since the last paint.
    fn paint(&mut self, turtle: &Turtle) -> bool {
        if self.frame == Some(turtle.frame()) {
            return false;
        }
        self.repaint(turtle);
        true
    }

    fn repaint(&mut self, turtle: &Turtle) {
        self.frame = Some(turtle.frame());
        self.svg = render::to_svg_string(turtle);
    }
}

/// Shows every step of a running script, waiting for the turtle's speed in between.
struct Animate {
    canvas: Arc<Mutex<Canvas>>,
    refresh: Refresh,
    sleep: SleepPacing,
}

impl Pacer for Animate {
    fn step(&mut self, turtle: &Turtle) {
        if lock(&self.canvas).paint(turtle) {
            (self.refresh)();
        }
        self.sleep.step(turtle);
    }
}

// Lock order: session, then canvas.
#[derive(Clone)]
struct State {
    session: Arc<Mutex<Session>>,
    canvas: Arc<Mutex<Canvas>>,
}

impl Default for State {
    fn default() -> State {
        let session = Session::default();
        let mut canvas = Canvas::default();
        canvas.repaint(&session.turtle);
        State {
            session: Arc::new(Mutex::new(session)),
            canvas: Arc::new(Mutex::new(canvas)),
        }
    }
}

impl State {
    fn run(&self, code: &str, refresh: Refresh) -> Outcome {
        let mut session = lock(&self.session);
        let Session { turtle, interp } = &mut *session;
        interp.set_pacer(Animate {
            canvas: self.canvas.clone(),
            refresh: refresh.clone(),
            sleep: SleepPacing::default(),
        });
        let outcome = interp.execute(turtle, code);

        // Pen changes don't count as steps, so the final picture is always painted.
        lock(&self.canvas).repaint(turtle);
        refresh();
        outcome
    }

    fn canvas(&self) -> String {
        lock(&self.canvas).svg.clone()
    }

    fn save(&self) -> anyhow::Result<()> {
        let Some(path) = rfd::FileDialog::new()
            .set_title("Save Drawing")
            .add_filter("Drawing", &["xml"])
            .set_file_name("drawing.xml")
            .save_file()
        else {
            return Ok(());
        };
        lock(&self.session).turtle.save_to_file(path)?;
        Ok(())
    }

    fn load(&self) -> anyhow::Result<()> {
        let Some(path) = rfd::FileDialog::new()
            .set_title("Load Drawing")
            .add_filter("Drawing", &["xml"])
            .set_directory(".")
            .pick_file()
        else {
            return Ok(());
        };
        let mut session = lock(&self.session);
        session.turtle.load_from_file(path)?;
        lock(&self.canvas).repaint(&session.turtle);
        Ok(())
    }
}

fn window_config() -> Config {
    let mut app_menu = MenuBar::new();
    app_menu.add_native_item(MenuItem::CloseWindow);
    app_menu.add_native_item(MenuItem::Separator);
    app_menu.add_native_item(MenuItem::Quit);

    let mut menu = MenuBar::new();
    menu.add_submenu("Logopad", true, app_menu);

    Config::new().with_window(
        WindowBuilder::new()
            .with_title("Logopad")
            .with_inner_size(LogicalSize::new(1000.0, 700.0))
            .with_min_inner_size(LogicalSize::new(640.0, 480.0))
            .with_menu(menu),
    )
}

fn main() {
    pretty_env_logger::init();
    dioxus_desktop::launch_with_props(app, State::default(), window_config());
}

fn app(cx: Scope<State>) -> Element {
    let text = use_state(&cx, || String::from(DEMO_SCRIPT));
    let refresh = cx.schedule_update();
    let canvas = cx.props.canvas();

    // Failures are logged and otherwise ignored: a drawing that can't be saved or loaded
    // leaves the canvas as it was.
    cx.render(rsx! (
        style { include_str!("./style.css") }
        nav {
            class: "menu",
            span { class: "menu-title", "File" }
            button {
                onclick: move |_| {
                    if let Err(e) = cx.props.save() {
                        log::warn!("save failed: {e}");
                    }
                },
                "Save…"
            }
            button {
                onclick: move |_| {
                    if let Err(e) = cx.props.load() {
                        log::warn!("load failed: {e}");
                    }
                    cx.needs_update();
                },
                "Load…"
            }
        }
        div {
            class: "main",
            div {
                class: "editor",
                textarea {
                    value: "{text}",
                    spellcheck: false,
                    autocomplete: false,
                    oninput: move |ev| text.set(ev.value.clone()),
                }
                button {
                    class: "run",
                    onclick: move |_| {
                        let state = cx.props.clone();
                        let code = text.get().clone();
                        let refresh = refresh.clone();
                        // The script runs on its own thread so that the window keeps painting
                        // while the turtle moves.
                        thread::spawn(move || {
                            if state.run(&code, refresh) == Outcome::Bye {
                                log::info!("bye");
                                std::process::exit(0);
                            }
                        });
                    },
                    "Run"
                }
            }
            div {
                class: "canvas",
                dangerous_inner_html: "{canvas}",
            }
        }
    ))
}
