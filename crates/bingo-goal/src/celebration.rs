// celebration.rs - When to show the "target reached" celebration.
//
// The celebration shows once when the board reaches its target. After the
// user acknowledges it, it stays hidden until the board falls back under
// the target and then reaches it again.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Celebration {
    /// The celebration should currently be on screen.
    pub showing: bool,

    /// The user has dismissed the celebration for the current win.
    pub acknowledged: bool,
}

impl Celebration {
    /// Update after the line count changed.
    pub fn observe(self, completed_lines: u32, target: u32) -> Celebration {
        if completed_lines >= target {
            Celebration {
                showing: self.showing || !self.acknowledged,
                acknowledged: self.acknowledged,
            }
        } else {
            Celebration {
                showing: false,
                acknowledged: false,
            }
        }
    }

    /// The user dismissed the celebration and keeps playing.
    pub fn acknowledge(self) -> Celebration {
        Celebration {
            showing: false,
            acknowledged: self.acknowledged || self.showing,
        }
    }
}
