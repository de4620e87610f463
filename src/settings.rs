use crate::pattern::BackgroundPattern;

/// Allowed session lengths offered by the settings dialog, in minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationRange {
    pub min: u32,
    pub max: u32,
    pub step: u32,
}

pub const SESSION_RANGE: DurationRange = DurationRange {
    min: 5,
    max: 120,
    step: 5,
};

impl DurationRange {
    /// Clamp into range and snap down onto the step grid
    pub fn snap(&self, minutes: u32) -> u32 {
        let clamped = minutes.clamp(self.min, self.max);
        let steps = (clamped - self.min) / self.step.max(1);
        self.min + steps * self.step.max(1)
    }

    pub fn contains(&self, minutes: u32) -> bool {
        (self.min..=self.max).contains(&minutes) && (minutes - self.min) % self.step.max(1) == 0
    }
}

/// Pending edits in the settings dialog. Nothing touches the timer until `apply`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsDraft {
    minutes: u32,
    range: DurationRange,
}

impl SettingsDraft {
    pub fn new(current_minutes: u32) -> Self {
        Self::with_range(current_minutes, SESSION_RANGE)
    }

    pub fn with_range(current_minutes: u32, range: DurationRange) -> Self {
        Self {
            minutes: range.snap(current_minutes),
            range,
        }
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn range(&self) -> DurationRange {
        self.range
    }

    pub fn increase(&mut self) {
        self.minutes = self.range.snap(self.minutes.saturating_add(self.range.step));
    }

    pub fn decrease(&mut self) {
        self.minutes = self.range.snap(self.minutes.saturating_sub(self.range.step));
    }

    /// Position of the slider knob in [0, 1]
    pub fn position(&self) -> f64 {
        let span = self.range.max.saturating_sub(self.range.min);
        if span == 0 {
            return 1.0;
        }
        f64::from(self.minutes - self.range.min) / f64::from(span)
    }

    pub fn apply(self) -> u32 {
        self.minutes
    }
}

/// Which row of the settings dialog has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    Duration,
    Pattern,
}

impl SettingsField {
    pub fn other(self) -> Self {
        match self {
            SettingsField::Duration => SettingsField::Pattern,
            SettingsField::Pattern => SettingsField::Duration,
        }
    }
}

/// Full dialog state: the duration draft plus focus. Pattern changes go
/// straight to the app, so only its focus lives here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsDialog {
    pub draft: SettingsDraft,
    pub focus: SettingsField,
}

impl SettingsDialog {
    pub fn open(current_minutes: u32) -> Self {
        Self {
            draft: SettingsDraft::new(current_minutes),
            focus: SettingsField::Duration,
        }
    }

    /// Step the focused field. Returns a new pattern when the pattern row changed.
    pub fn adjust(&mut self, forward: bool, pattern: BackgroundPattern) -> Option<BackgroundPattern> {
        match (self.focus, forward) {
            (SettingsField::Duration, true) => {
                self.draft.increase();
                None
            }
            (SettingsField::Duration, false) => {
                self.draft.decrease();
                None
            }
            (SettingsField::Pattern, true) => Some(pattern.next()),
            (SettingsField::Pattern, false) => Some(pattern.prev()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snap_clamps_and_aligns() {
        assert_eq!(SESSION_RANGE.snap(0), 5);
        assert_eq!(SESSION_RANGE.snap(25), 25);
        assert_eq!(SESSION_RANGE.snap(27), 25);
        assert_eq!(SESSION_RANGE.snap(500), 120);
    }

    #[test]
    fn contains_only_grid_points() {
        assert!(SESSION_RANGE.contains(5));
        assert!(SESSION_RANGE.contains(120));
        assert!(!SESSION_RANGE.contains(7));
        assert!(!SESSION_RANGE.contains(125));
        assert!(!SESSION_RANGE.contains(0));
    }

    #[test]
    fn draft_steps_by_five_within_bounds() {
        let mut d = SettingsDraft::new(115);
        d.increase();
        assert_eq!(d.minutes(), 120);
        d.increase();
        assert_eq!(d.minutes(), 120);

        let mut d = SettingsDraft::new(10);
        d.decrease();
        assert_eq!(d.minutes(), 5);
        d.decrease();
        assert_eq!(d.minutes(), 5);
    }

    #[test]
    fn draft_starts_from_snapped_current_length() {
        // a length from the command line may sit off the grid
        assert_eq!(SettingsDraft::new(1).minutes(), 5);
        assert_eq!(SettingsDraft::new(33).minutes(), 30);
    }

    #[test]
    fn position_spans_unit_interval() {
        assert_eq!(SettingsDraft::new(5).position(), 0.0);
        assert_eq!(SettingsDraft::new(120).position(), 1.0);
    }

    #[test]
    fn dialog_adjusts_focused_field() {
        let mut dialog = SettingsDialog::open(25);
        assert_eq!(dialog.adjust(true, BackgroundPattern::None), None);
        assert_eq!(dialog.draft.minutes(), 30);

        dialog.focus = dialog.focus.other();
        assert_eq!(
            dialog.adjust(true, BackgroundPattern::None),
            Some(BackgroundPattern::Dots)
        );
        assert_eq!(
            dialog.adjust(false, BackgroundPattern::None),
            Some(BackgroundPattern::Hexagons)
        );
        assert_eq!(dialog.draft.minutes(), 30);
    }
}
