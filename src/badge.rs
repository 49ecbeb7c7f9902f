use std::fmt::{Display, Formatter};

/// What the badge rendering layer shows on the page.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Badge {
    pub minutes: u32,

    /// The estimate is not personalized yet.
    pub is_learning: bool,
}

impl Display for Badge {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_learning {
            write!(formatter, "📖 ~{} min • Learning...", self.minutes)
        } else {
            write!(formatter, "📖 ~{} min read", self.minutes)
        }
    }
}
