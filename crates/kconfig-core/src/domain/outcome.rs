//! Outcomes of a module run.

/// Result of ensuring an entry holds a value.
///
/// ```text
/// Unchanged ── current value already matches, nothing spawned
/// WouldChange ─ values differ but check mode is on, nothing spawned
/// Changed ──── the write tool ran and succeeded
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Unchanged,
    WouldChange,
    Changed,
}

impl WriteOutcome {
    /// Whether the host should report the run as changed.
    ///
    /// Check mode reports `changed: true` for a pending write, so
    /// [`WriteOutcome::WouldChange`] counts as a change here.
    pub fn is_changed(self) -> bool {
        !matches!(self, WriteOutcome::Unchanged)
    }
}

/// What a successful module run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleOutcome {
    /// `state=read`: the current value, `None` when the entry is unset.
    Read { value: Option<String> },
    /// `state=present`: the write result plus the values on either side.
    Present {
        outcome: WriteOutcome,
        before: Option<String>,
        after: String,
    },
}

impl ModuleOutcome {
    pub fn is_changed(&self) -> bool {
        match self {
            ModuleOutcome::Read { .. } => false,
            ModuleOutcome::Present { outcome, .. } => outcome.is_changed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_unchanged_reports_no_change() {
        assert!(!WriteOutcome::Unchanged.is_changed());
        assert!(WriteOutcome::WouldChange.is_changed());
        assert!(WriteOutcome::Changed.is_changed());
    }

    #[test]
    fn test_read_outcome_is_never_changed() {
        let outcome = ModuleOutcome::Read {
            value: Some("600".to_string()),
        };
        assert!(!outcome.is_changed());
    }
}
