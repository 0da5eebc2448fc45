use cupid::Size;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;

/// Allocated size of `widget`, or of the first monitor before it is laid out.
pub fn viewport_size(widget: &impl IsA<gtk::Widget>) -> Size {
    allocated(widget.width(), widget.height())
        .or_else(|| {
            first_monitor().map(|m| {
                let geometry = m.geometry();
                Size::new(geometry.width() as f64, geometry.height() as f64)
            })
        })
        .unwrap_or_default()
}

fn allocated(width: i32, height: i32) -> Option<Size> {
    (width > 0 && height > 0).then(|| Size::new(width as f64, height as f64))
}

pub fn first_monitor() -> Option<gdk::Monitor> {
    let display = gdk::Display::default()?;
    let monitors = display.monitors();
    (0..monitors.n_items()).find_map(|i| {
        monitors
            .item(i)
            .and_then(|item| item.downcast::<gdk::Monitor>().ok())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unallocated_widget_has_no_size() {
        assert_eq!(allocated(0, 0), None);
        assert_eq!(allocated(800, 0), None);
        assert_eq!(allocated(800, 600), Some(Size::new(800.0, 600.0)));
    }
}
