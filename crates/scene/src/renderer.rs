use crate::layout::DrawItem;
use crate::walkthrough::FrameView;

/// Renderer-agnostic interface.
///
/// A renderer reads a frame view and the draw list, then produces output.
/// It never mutates the walkthrough.
pub trait SceneRenderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&self, frame: &FrameView, items: &[DrawItem]) -> Self::Output;
}

/// Human-readable dump of a frame. Used by the CLI and in tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl SceneRenderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: &FrameView, items: &[DrawItem]) -> String {
        let mut out = String::new();
        let p = frame.view_position;
        let sun = &frame.dir_light;

        out.push_str(&format!(
            "=== Frame (t={:.2}s, dt={:.4}s) ===\n",
            frame.time.elapsed, frame.time.delta
        ));
        out.push_str(&format!(
            "Camera: pos=({:.2}, {:.2}, {:.2})\n",
            p.x, p.y, p.z
        ));
        if sun.is_day() {
            let d = sun.direction;
            out.push_str(&format!(
                "Sun: day dir=({:.2}, {:.2}, {:.2}) diffuse={:.3}\n",
                d.x, d.y, d.z, sun.diffuse.x
            ));
        } else {
            out.push_str("Sun: night\n");
        }
        out.push_str(&format!(
            "Flashlight: {}\n",
            if frame.flashlight_on { "on" } else { "off" }
        ));
        out.push_str(&format!("Draws: {}\n", items.len()));

        for item in items {
            let t = item.transform.position;
            let texture = item
                .texture
                .map(|s| s.relative_path())
                .unwrap_or("(model materials)");
            out.push_str(&format!(
                "  {:<10} {:?} pos=({:.2}, {:.2}, {:.2}) scale={:.2} tex={}\n",
                item.name, item.mesh, t.x, t.y, t.z, item.transform.scale.x, texture
            ));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FrameTime;
    use crate::layout::room;
    use crate::walkthrough::Walkthrough;
    use arbor_input::Action;

    #[test]
    fn debug_renderer_lists_every_draw() {
        let walk = Walkthrough::new();
        let time = FrameTime {
            elapsed: 5.0,
            delta: 0.016,
        };
        let output = DebugTextRenderer::new().render(&walk.frame(time), &room());

        assert!(output.contains("t=5.00s"));
        assert!(output.contains("Draws: 10"));
        assert!(output.contains("Sun: day"));
        assert!(output.contains("Flashlight: off"));
        assert!(output.contains("textures/mountain.jpeg"));
        assert!(output.contains("(model materials)"));
    }

    #[test]
    fn debug_renderer_reports_night_and_flashlight() {
        let mut walk = Walkthrough::new();
        let time = FrameTime {
            elapsed: 40.0,
            delta: 0.0,
        };
        walk.apply(time, &[Action::ToggleFlashlight]);
        let output = DebugTextRenderer::new().render(&walk.frame(time), &[]);

        assert!(output.contains("Sun: night"));
        assert!(output.contains("Flashlight: on"));
        assert!(output.contains("Draws: 0"));
    }
}
