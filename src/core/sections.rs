use serde::{Deserialize, Serialize};
use std::fmt;

/// Home page sections in navigation (and document) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Hero,
    Profile,
    Experience,
    Skills,
    Projects,
    Education,
}

impl SectionId {
    pub const ALL: [SectionId; 6] = [
        SectionId::Hero,
        SectionId::Profile,
        SectionId::Experience,
        SectionId::Skills,
        SectionId::Projects,
        SectionId::Education,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionId::Hero => "hero",
            SectionId::Profile => "profile",
            SectionId::Experience => "experience",
            SectionId::Skills => "skills",
            SectionId::Projects => "projects",
            SectionId::Education => "education",
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SectionBounds {
    pub offset_top: f64,
    pub height: f64,
}

impl SectionBounds {
    fn contains(&self, position: f64) -> bool {
        position >= self.offset_top && position < self.offset_top + self.height
    }
}

/// 判定點位於捲動位置再往下三分之一視窗高度
pub fn scroll_threshold(scroll_y: f64, viewport_height: f64) -> f64 {
    scroll_y + viewport_height / 3.0
}

/// First section, in [`SectionId::ALL`] order, whose box contains the
/// threshold. Sections without a rendered box are skipped.
pub fn active_section<F>(scroll_y: f64, viewport_height: f64, layout: F) -> Option<SectionId>
where
    F: Fn(SectionId) -> Option<SectionBounds>,
{
    let position = scroll_threshold(scroll_y, viewport_height);
    SectionId::ALL
        .into_iter()
        .find(|section| layout(*section).is_some_and(|bounds| bounds.contains(position)))
}

/// Remembers the highlighted section between scroll events; a scroll that
/// lands between sections keeps the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionTracker {
    current: SectionId,
}

impl Default for SectionTracker {
    fn default() -> Self {
        Self {
            current: SectionId::Hero,
        }
    }
}

impl SectionTracker {
    pub fn starting_at(current: SectionId) -> Self {
        Self { current }
    }

    pub fn current(&self) -> SectionId {
        self.current
    }

    pub fn on_scroll<F>(&mut self, scroll_y: f64, viewport_height: f64, layout: F) -> SectionId
    where
        F: Fn(SectionId) -> Option<SectionBounds>,
    {
        if let Some(section) = active_section(scroll_y, viewport_height, layout) {
            if section != self.current {
                tracing::trace!(from = %self.current, to = %section, "Active section changed");
            }
            self.current = section;
        }
        self.current
    }
}
