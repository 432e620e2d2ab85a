//! Widget configuration, read from the host element's data attributes.
//!
//! Parsing is separated from DOM access: bad or missing values fall back
//! to defaults, and the height default follows the width, as the original
//! tag attributes did.

/// Default drawing-area edge in pixels.
pub const DEFAULT_SIZE: u32 = 500;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum RendererKind {
    #[default]
    Svg,
    Canvas,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WidgetConfig {
    pub width: u32,
    pub height: u32,
    pub renderer: RendererKind,
    /// Number of randomly colored cells to scatter after layout.
    pub random_cells: u32,
    /// Base fill override for empty cells.
    pub fill_style: Option<String>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            renderer: RendererKind::Svg,
            random_cells: 0,
            fill_style: None,
        }
    }
}

/// Build a config from raw attribute strings.
pub fn parse_config(
    width: Option<&str>,
    height: Option<&str>,
    renderer: Option<&str>,
    random_cells: Option<&str>,
    fill: Option<&str>,
) -> WidgetConfig {
    let width = parse_u32(width).unwrap_or(DEFAULT_SIZE);
    let height = parse_u32(height).unwrap_or(width);
    let renderer = match renderer.map(str::trim) {
        Some("canvas") => RendererKind::Canvas,
        _ => RendererKind::Svg,
    };
    let random_cells = parse_u32(random_cells).unwrap_or(0);
    let fill_style = fill
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    WidgetConfig {
        width,
        height,
        renderer,
        random_cells,
        fill_style,
    }
}

fn parse_u32(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|v| v.trim().parse().ok()).filter(|&v| v > 0)
}

/// Read the config off a host element's `data-*` attributes.
#[cfg(target_arch = "wasm32")]
pub fn from_element(el: &web_sys::Element) -> WidgetConfig {
    parse_config(
        el.get_attribute("data-width").as_deref(),
        el.get_attribute("data-height").as_deref(),
        el.get_attribute("data-renderer").as_deref(),
        el.get_attribute("data-random-cells").as_deref(),
        el.get_attribute("data-fill").as_deref(),
    )
}
