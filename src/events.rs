/// Discrete user input delivered to the playback controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackCommand {
    Next,
    Previous,
    Delete,
    Exit,
}

/// Why an advance is happening. Everything except [`Trigger::Auto`] is paced
/// with the resume delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Auto,
    ManualNext,
    ManualPrev,
    PostDelete,
    PostError,
}

impl Trigger {
    #[must_use]
    pub const fn uses_resume_delay(self) -> bool {
        !matches!(self, Self::Auto)
    }
}
