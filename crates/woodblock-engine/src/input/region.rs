use serde::Serialize;

/// What kind of gesture a region accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionKind {
    /// Freehand drawing or carving canvas.
    Canvas,
    /// An object that is dragged around.
    Draggable,
    /// Brush/rub surface tracked on the coverage grid.
    CoverageSurface,
}

/// A statically declared interactive region of a stage.
///
/// The host's scroll lock uses these as its allowlist: gestures inside a
/// region with `contains_scroll` must reach the stage and never scroll the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InputRegion {
    pub name: &'static str,
    pub kind: RegionKind,
    pub contains_scroll: bool,
}

impl InputRegion {
    pub const fn interactive(name: &'static str, kind: RegionKind) -> Self {
        Self {
            name,
            kind,
            contains_scroll: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_for_the_host() {
        const REGION: InputRegion = InputRegion::interactive("carve-canvas", RegionKind::Canvas);
        let json = serde_json::to_string(&REGION).unwrap();
        assert_eq!(
            json,
            r#"{"name":"carve-canvas","kind":"canvas","contains_scroll":true}"#
        );
    }
}
