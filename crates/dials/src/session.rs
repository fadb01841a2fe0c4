//! Recorded pointer sessions.
//!
//! ```toml
//! [[samples]]
//! x = 119
//! y = 91
//! transition = "pressed"
//! ```

use std::path::Path;

use anyhow::Context;
use dials_ui::{ButtonTracker, PointerSample};
use serde::{Deserialize, Serialize};

/// An ordered list of pointer samples in panel coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Samples, in delivery order.
    #[serde(default)]
    pub samples: Vec<PointerSample>,
}

impl Session {
    /// Loads a session file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading session {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing session {}", path.display()))
    }

    /// Gesture script over the default panel: drag a slider, click the
    /// button, step the options to the end and pull the red channel down.
    #[must_use]
    pub fn demo() -> Self {
        let mut recorder = Recorder::default();

        recorder.hover(60, 91).hover(119, 91);
        recorder.drag(&[119, 150, 200, 250, 300, 300], 91);
        recorder.drag(&[200, 200], 149);
        for _ in 0..4 {
            recorder.drag(&[280, 280], 178);
        }
        recorder.drag(&[178, 150, 120, 100], 13);
        recorder.hover(390, 590);

        Self {
            samples: recorder.samples,
        }
    }
}

/// Builds samples from button levels, the way a windowed host would.
#[derive(Default)]
struct Recorder {
    tracker: ButtonTracker,
    samples: Vec<PointerSample>,
}

impl Recorder {
    fn sample(&mut self, x: i32, y: i32, down: bool) -> &mut Self {
        let transition = self.tracker.sample(down);
        self.samples.push(PointerSample::new(x, y, transition));
        self
    }

    fn hover(&mut self, x: i32, y: i32) -> &mut Self {
        self.sample(x, y, false)
    }

    /// Press at the first x, hold through the rest, release at the last.
    fn drag(&mut self, xs: &[i32], y: i32) -> &mut Self {
        for &x in xs {
            self.sample(x, y, true);
        }
        if let Some(&last) = xs.last() {
            self.sample(last, y, false);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dials_ui::Transition;

    #[test]
    fn test_demo_gestures_are_balanced() {
        let session = Session::demo();
        let pressed = session
            .samples
            .iter()
            .filter(|s| s.transition == Transition::Pressed)
            .count();
        let released = session
            .samples
            .iter()
            .filter(|s| s.transition == Transition::Released)
            .count();

        assert_eq!(pressed, 7);
        assert_eq!(pressed, released);
    }

    #[test]
    fn test_parse_session() {
        let session: Session = toml::from_str(
            r#"
            [[samples]]
            x = 1
            y = 2
            transition = "held"

            [[samples]]
            x = 3
            y = 4
            "#,
        )
        .unwrap();

        assert_eq!(
            session.samples,
            vec![
                PointerSample::new(1, 2, Transition::Held),
                PointerSample::new(3, 4, Transition::None),
            ]
        );
    }
}
