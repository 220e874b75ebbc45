//! Width rules for the contact list (aside) pane.

pub const MIN_ASIDE_WIDTH: &str = "78px";
pub const DEFAULT_ASIDE_WIDTH_PX: f64 = 300.0;

/// Style assignments for the aside pane.
#[derive(Debug, Clone, PartialEq)]
pub struct AsideStyle {
    /// CSS custom properties on the pane element.
    pub properties: Vec<(&'static str, String)>,
    pub width: String,
    pub flex_basis: Option<String>,
}

/// Initial override. In two-column mode the pane may be dragged up to 80vw;
/// in single-column mode it fills the window.
pub fn aside_override(main_visible: bool) -> AsideStyle {
    let default = px(DEFAULT_ASIDE_WIDTH_PX);
    let mut properties = vec![
        ("--min-width-aside", MIN_ASIDE_WIDTH.to_string()),
        ("--default-width-aside", default.clone()),
    ];
    let flex_basis = if main_visible {
        properties.push(("--max-width-aside", "80vw".to_string()));
        properties.push(("--drag-width-aside", default.clone()));
        default.clone()
    } else {
        properties.push(("--max-width-aside", "100%".to_string()));
        properties.push(("--drag-width-aside", "100%".to_string()));
        "100%".to_string()
    };

    AsideStyle {
        properties,
        width: default,
        flex_basis: Some(flex_basis),
    }
}

/// An in-progress drag of the pane's resize handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeDrag {
    pub start_x: f64,
    pub start_width: f64,
}

impl ResizeDrag {
    pub fn width_at(&self, client_x: f64) -> f64 {
        self.start_width + client_x - self.start_x
    }

    pub fn style_at(&self, client_x: f64) -> AsideStyle {
        let width = px(self.width_at(client_x));
        AsideStyle {
            properties: vec![("--drag-width-aside", width.clone())],
            width: width.clone(),
            flex_basis: Some(width),
        }
    }
}

pub fn px(value: f64) -> String {
    format!("{value}px")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_column_override() {
        let style = aside_override(true);
        assert_eq!(style.width, "300px");
        assert_eq!(style.flex_basis.as_deref(), Some("300px"));
        assert!(style
            .properties
            .contains(&("--max-width-aside", "80vw".to_string())));
    }

    #[test]
    fn single_column_override() {
        let style = aside_override(false);
        assert_eq!(style.flex_basis.as_deref(), Some("100%"));
        assert!(style
            .properties
            .contains(&("--drag-width-aside", "100%".to_string())));
    }

    #[test]
    fn drag_tracks_pointer() {
        let drag = ResizeDrag {
            start_x: 100.0,
            start_width: 300.0,
        };
        assert_eq!(drag.width_at(150.0), 350.0);
        let style = drag.style_at(80.0);
        assert_eq!(style.width, "280px");
        assert_eq!(style.properties, vec![("--drag-width-aside", "280px".to_string())]);
    }
}
