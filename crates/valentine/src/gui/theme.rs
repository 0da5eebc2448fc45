use cupid::swatch::Swatch;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub backdrop_top: Srgba<f64>,
    pub backdrop_bottom: Srgba<f64>,
    pub vignette: Srgba<f64>,
    pub placeholder: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            backdrop_top: Self::lookup_color(
                context,
                "valentine_bg_top",
                Srgba::new(1.0, 0.93, 0.95, 1.0),
                None,
            ),
            backdrop_bottom: Self::lookup_color(
                context,
                "valentine_bg_bottom",
                Srgba::new(0.91, 0.97, 0.92, 1.0),
                None,
            ),
            vignette: Self::lookup_color(
                context,
                "valentine_vignette",
                Srgba::new(0.55, 0.2, 0.3, 0.18),
                Some(0.18),
            ),
            placeholder: Self::lookup_color(
                context,
                "valentine_placeholder",
                Srgba::new(1.0, 0.42, 0.54, 0.35),
                Some(0.35),
            ),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn with_alpha(swatch: Swatch, alpha: f64) -> Srgba<f64> {
    let (r, g, b) = swatch.components();
    Srgba::new(r, g, b, alpha)
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
@define-color valentine_bg_top #ffe4ec;
@define-color valentine_bg_bottom #e8f8ea;
@define-color valentine_vignette rgba(140, 50, 80, 0.18);
@define-color valentine_placeholder rgba(255, 107, 138, 0.35);

.valentine-window {
    background-color: @valentine_bg_top;
}
.valentine-scene {
    transition: opacity 600ms ease-out;
}
.valentine-card {
    background-color: rgba(255, 255, 255, 0.88);
    border-radius: 28px;
    border: 2px solid #ffc2d1;
    padding: 36px 48px;
    box-shadow: 0 12px 40px rgba(255, 107, 138, 0.25);
}
.valentine-title {
    font-family: serif;
    font-size: 22px;
    color: #52b69a;
}
.valentine-question {
    font-family: serif;
    font-size: 44px;
    font-weight: bold;
    color: #ff6b8a;
}
.valentine-message {
    font-size: 15px;
    color: #6b4a55;
}
.valentine-hint {
    font-size: 13px;
    color: #52b69a;
}
.valentine-yes {
    background: #ff6b8a;
    color: white;
    font-weight: bold;
    border-radius: 999px;
    padding: 12px 36px;
}
.valentine-no {
    background: #f1f1f1;
    color: #6b4a55;
    border-radius: 999px;
    min-width: 100px;
    padding: 12px 20px;
}
.valentine-celebration-title {
    font-family: serif;
    font-size: 40px;
    font-weight: bold;
    color: #ff6b8a;
}
.valentine-gallery-title {
    font-family: serif;
    font-size: 28px;
    color: #52b69a;
}
.valentine-tile {
    border-radius: 16px;
}
.valentine-lightbox {
    background-color: rgba(20, 8, 12, 0.82);
}
.valentine-lightbox button {
    color: white;
    font-size: 24px;
    background: rgba(255, 255, 255, 0.12);
    border-radius: 999px;
}
.valentine-counter {
    color: white;
}
.valentine-confetti, .valentine-backdrop {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
