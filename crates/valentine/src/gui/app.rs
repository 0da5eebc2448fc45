use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::backdrop::Backdrop;
use crate::gui::confetti::{CairoSurface, GtkScheduler};
use crate::gui::gallery::{self, LIGHTBOX_HEIGHT, LIGHTBOX_WIDTH, Photo, THUMBNAIL_SIZE};
use crate::gui::theme::{self, ThemeColors};
use crate::gui::window;
use cupid::{AppState, IntroStage, Launcher, Screen};
use gtk::prelude::*;
use gtk4 as gtk;
use rand::SeedableRng;
use rand::rngs::StdRng;
use relm4::prelude::*;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

pub struct AppInit {
    pub config: Config,
    pub config_path: PathBuf,
    pub rng: StdRng,
    pub rx: async_channel::Receiver<AppEvent>,
}

pub struct AppModel {
    pub state: Rc<RefCell<AppState>>,
    pub config: Config,
    pub config_path: PathBuf,
    pub rng: StdRng,
    pub photos: Rc<Vec<Photo>>,
    pub launcher: Launcher<CairoSurface>,
    pub confetti_area: gtk::DrawingArea,
    pub lightbox_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Reveal(IntroStage),
    Accept,
    Decline,
    Evade,
    OpenPhoto(usize),
    ClosePhoto,
    NextPhoto,
    PreviousPhoto,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl AppModel {
    fn asking(&self) -> bool {
        self.state.borrow().screen() == Screen::Asking
    }

    fn revealed(&self, stage: IntroStage) -> bool {
        self.state.borrow().intro() >= stage
    }

    /// Margins of the relocated "No" button, once it has dodged.
    fn floating_no(&self) -> Option<(i32, i32)> {
        if !self.asking() {
            return None;
        }
        self.state
            .borrow()
            .evasive()
            .position()
            .map(|p| (p.x.max(0.0).round() as i32, p.y.max(0.0).round() as i32))
    }

    fn counter(&self) -> String {
        self.state.borrow().lightbox().counter().unwrap_or_default()
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = AppInit;
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Will you be my valentine?"),
            set_default_size: (1024, 768),
            add_css_class: "valentine-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    match key {
                        gtk::gdk::Key::Escape => sender.input(AppMsg::ClosePhoto),
                        gtk::gdk::Key::Left => sender.input(AppMsg::PreviousPhoto),
                        gtk::gdk::Key::Right => sender.input(AppMsg::NextPhoto),
                        _ => return glib::Propagation::Proceed,
                    }
                    glib::Propagation::Stop
                }
            },

            gtk::Overlay {
                #[name = "backdrop"]
                #[wrap(Some)]
                set_child = &gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,
                    add_css_class: "valentine-backdrop",
                },

                add_overlay = &gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 16,
                    set_halign: gtk::Align::Center,
                    set_valign: gtk::Align::Center,
                    add_css_class: "valentine-scene",
                    #[watch]
                    set_visible: model.asking(),
                    #[watch]
                    set_opacity: if model.revealed(IntroStage::Content) { 1.0 } else { 0.0 },

                    gtk::Box {
                        set_orientation: gtk::Orientation::Vertical,
                        set_spacing: 12,
                        add_css_class: "valentine-card",
                        #[watch]
                        set_opacity: if model.revealed(IntroStage::Card) { 1.0 } else { 0.0 },
                        #[watch]
                        set_can_target: model.state.borrow().accepts_input(),

                        gtk::Label {
                            set_label: "Will You Be My",
                            add_css_class: "valentine-title",
                        },
                        gtk::Label {
                            set_label: &model.config.card.question(),
                            add_css_class: "valentine-question",
                        },
                        gtk::Label {
                            set_label: &model.config.card.message,
                            set_justify: gtk::Justification::Center,
                            set_wrap: true,
                            add_css_class: "valentine-message",
                        },

                        gtk::Box {
                            set_orientation: gtk::Orientation::Horizontal,
                            set_spacing: 24,
                            set_halign: gtk::Align::Center,
                            set_margin_top: 12,

                            gtk::Button {
                                set_label: "♥ Yes! ♥",
                                add_css_class: "valentine-yes",
                                connect_clicked => AppMsg::Accept,
                            },

                            gtk::Button {
                                set_label: "No",
                                add_css_class: "valentine-no",
                                #[watch]
                                set_visible: model.floating_no().is_none(),
                                connect_clicked => AppMsg::Decline,

                                add_controller = gtk::EventControllerMotion {
                                    connect_enter[sender] => move |_, _, _| {
                                        sender.input(AppMsg::Evade);
                                    }
                                },
                                add_controller = gtk::GestureClick {
                                    set_touch_only: true,
                                    connect_pressed[sender] => move |_, _, _, _| {
                                        sender.input(AppMsg::Evade);
                                    }
                                },
                            },
                        },
                    },

                    gtk::Label {
                        set_label: &model.config.card.hint,
                        add_css_class: "valentine-hint",
                    },
                },

                add_overlay = &gtk::Button {
                    set_label: "No",
                    add_css_class: "valentine-no",
                    set_halign: gtk::Align::Start,
                    set_valign: gtk::Align::Start,
                    #[watch]
                    set_visible: model.floating_no().is_some(),
                    #[watch]
                    set_margin_start: model.floating_no().map_or(0, |(x, _)| x),
                    #[watch]
                    set_margin_top: model.floating_no().map_or(0, |(_, y)| y),
                    connect_clicked => AppMsg::Decline,

                    add_controller = gtk::EventControllerMotion {
                        connect_enter[sender] => move |_, _, _| {
                            sender.input(AppMsg::Evade);
                        }
                    },
                    add_controller = gtk::GestureClick {
                        set_touch_only: true,
                        connect_pressed[sender] => move |_, _, _, _| {
                            sender.input(AppMsg::Evade);
                        }
                    },
                },

                add_overlay = &gtk::ScrolledWindow {
                    set_hscrollbar_policy: gtk::PolicyType::Never,
                    #[watch]
                    set_visible: !model.asking(),

                    #[wrap(Some)]
                    set_child = &gtk::Box {
                        set_orientation: gtk::Orientation::Vertical,
                        set_spacing: 16,
                        set_margin_all: 32,
                        set_halign: gtk::Align::Center,

                        gtk::Label {
                            set_label: "♥ She Said Yes! ♥",
                            add_css_class: "valentine-celebration-title",
                        },
                        gtk::Label {
                            set_label: "You just made me the happiest person alive.\nHere are some of my favorite memories of us...",
                            set_justify: gtk::Justification::Center,
                            add_css_class: "valentine-message",
                        },
                        gtk::Label {
                            set_label: "Our Beautiful Moments",
                            set_margin_top: 16,
                            add_css_class: "valentine-gallery-title",
                        },
                        gtk::Label {
                            set_label: "Every moment with you is a treasure I hold close to my heart",
                            add_css_class: "valentine-hint",
                        },

                        #[name = "gallery_grid"]
                        gtk::FlowBox {
                            set_selection_mode: gtk::SelectionMode::None,
                            set_homogeneous: true,
                            set_min_children_per_line: 2,
                            set_max_children_per_line: 4,
                            set_row_spacing: 16,
                            set_column_spacing: 16,
                        },

                        gtk::Label {
                            set_label: "Forever & Always ♥",
                            set_margin_top: 16,
                            add_css_class: "valentine-title",
                        },
                    },
                },

                add_overlay = &gtk::Box {
                    add_css_class: "valentine-lightbox",
                    #[watch]
                    set_visible: model.state.borrow().lightbox().is_open(),

                    add_controller = gtk::GestureClick {
                        connect_released[sender] => move |_, _, _, _| {
                            sender.input(AppMsg::ClosePhoto);
                        }
                    },

                    gtk::Box {
                        set_orientation: gtk::Orientation::Vertical,
                        set_spacing: 12,
                        set_hexpand: true,
                        set_halign: gtk::Align::Center,
                        set_valign: gtk::Align::Center,

                        // clicks on the photo itself must not reach the backdrop
                        add_controller = gtk::GestureClick {
                            connect_pressed => move |gesture, _, _, _| {
                                gesture.set_state(gtk::EventSequenceState::Claimed);
                            }
                        },

                        gtk::Button {
                            set_label: "×",
                            set_halign: gtk::Align::End,
                            connect_clicked => AppMsg::ClosePhoto,
                        },

                        append: &model.lightbox_area,

                        gtk::Box {
                            set_orientation: gtk::Orientation::Horizontal,
                            set_spacing: 24,
                            set_halign: gtk::Align::Center,

                            gtk::Button {
                                set_label: "‹",
                                connect_clicked => AppMsg::PreviousPhoto,
                            },
                            gtk::Label {
                                add_css_class: "valentine-counter",
                                #[watch]
                                set_label: &model.counter(),
                            },
                            gtk::Button {
                                set_label: "›",
                                connect_clicked => AppMsg::NextPhoto,
                            },
                        },
                    },
                },

                add_overlay: &model.confetti_area,
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let AppInit {
            config,
            config_path,
            mut rng,
            rx,
        } = init;

        theme::load_css();

        let confetti_area = gtk::DrawingArea::new();
        confetti_area.set_hexpand(true);
        confetti_area.set_vexpand(true);
        confetti_area.set_can_target(false);
        confetti_area.add_css_class("valentine-confetti");

        let lightbox_area = gtk::DrawingArea::new();
        lightbox_area.set_content_width(LIGHTBOX_WIDTH);
        lightbox_area.set_content_height(LIGHTBOX_HEIGHT);

        let surface = Rc::new(RefCell::new(CairoSurface::new(confetti_area.clone())));
        let scheduler = Rc::new(GtkScheduler::new(&confetti_area));
        let launcher = Launcher::new(
            surface.clone(),
            scheduler,
            StdRng::from_rng(&mut rng),
            config.confetti.clone(),
        );

        let photos = Rc::new(Photo::load_all(&config.gallery.gallery()));
        let state = Rc::new(RefCell::new(AppState::new(photos.len())));
        let backdrop_painter = Backdrop::new(&mut rng);

        let model = AppModel {
            state,
            config,
            config_path,
            rng,
            photos,
            launcher,
            confetti_area,
            lightbox_area,
        };

        let widgets = view_output!();

        backdrop_painter.attach(&widgets.backdrop);

        model.confetti_area.set_draw_func(move |_, cr, _, _| {
            if let Err(e) = surface.borrow().paint(cr) {
                log::error!("Drawing error: {}", e);
            }
        });

        let (state_draw, photos_draw) = (model.state.clone(), model.photos.clone());
        model
            .lightbox_area
            .set_draw_func(move |area, cr, width, height| {
                let selected = state_draw.borrow().lightbox().selected();
                if let Some(photo) = selected.and_then(|i| photos_draw.get(i)) {
                    let colors = ThemeColors::from_context(&area.style_context());
                    if let Err(e) = gallery::draw_photo(cr, photo, &colors, width, height) {
                        log::error!("Drawing error: {}", e);
                    }
                }
            });

        for (index, photo) in model.photos.iter().enumerate() {
            let tile = build_tile(photo.clone(), index, &sender);
            widgets.gallery_grid.insert(&tile, -1);
        }

        for stage in [IntroStage::Content, IntroStage::Card] {
            let sender = sender.clone();
            glib::timeout_add_local_once(stage.delay(), move || {
                sender.input(AppMsg::Reveal(stage));
            });
        }

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Reveal(stage) => self.state.borrow_mut().reveal(stage),
            AppMsg::Accept if !self.state.borrow().accepts_input() => {}
            AppMsg::Accept => {
                let effects = self.state.borrow_mut().accept(&self.config.confetti);
                if !effects.is_empty() {
                    log::info!("Valentine accepted, launching confetti");
                    let area = self.confetti_area.clone();
                    self.launcher
                        .play(&effects, move || window::viewport_size(&area));
                }
            }
            AppMsg::Decline => {
                self.state.borrow_mut().decline();
            }
            AppMsg::Evade => {
                let viewport = window::viewport_size(&self.confetti_area);
                let moved =
                    self.state
                        .borrow_mut()
                        .evade(&mut self.rng, viewport, &self.config.evasive);
                if let Some(point) = moved {
                    log::debug!("Evasive button moved to ({:.0}, {:.0})", point.x, point.y);
                }
            }
            AppMsg::OpenPhoto(index) => {
                self.state.borrow_mut().lightbox_mut().open(index);
                self.lightbox_area.queue_draw();
            }
            AppMsg::ClosePhoto => self.state.borrow_mut().lightbox_mut().close(),
            AppMsg::NextPhoto => {
                self.state.borrow_mut().lightbox_mut().next();
                self.lightbox_area.queue_draw();
            }
            AppMsg::PreviousPhoto => {
                self.state.borrow_mut().lightbox_mut().previous();
                self.lightbox_area.queue_draw();
            }
            AppMsg::ConfigReload => match config::load_config(&self.config_path) {
                Ok(new_config) => {
                    self.launcher.set_tuning(new_config.confetti.clone());
                    self.config.confetti = new_config.confetti;
                    self.config.evasive = new_config.evasive;
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

fn build_tile(photo: Photo, index: usize, sender: &ComponentSender<AppModel>) -> gtk::DrawingArea {
    let tile = gtk::DrawingArea::new();
    tile.set_content_width(THUMBNAIL_SIZE);
    tile.set_content_height(THUMBNAIL_SIZE);
    tile.add_css_class("valentine-tile");
    tile.set_cursor_from_name(Some("pointer"));
    tile.set_tooltip_text(Some(&format!("Our memory {}", index + 1)));

    tile.set_draw_func(move |area, cr, width, height| {
        let colors = ThemeColors::from_context(&area.style_context());
        if let Err(e) = gallery::draw_thumbnail(cr, &photo, &colors, width, height) {
            log::error!("Drawing error for {}: {}", photo.source, e);
        }
    });

    let click = gtk::GestureClick::new();
    let sender = sender.clone();
    click.connect_released(move |_, _, _, _| {
        sender.input(AppMsg::OpenPhoto(index));
    });
    tile.add_controller(click);
    tile
}
