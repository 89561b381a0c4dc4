//! Draft/commit state for the filter panel.
//!
//! Holds two snapshots. Input handlers only ever touch the draft; the
//! active snapshot is replaced wholesale on [`FilterPanel::commit`].

use crate::FilterCriteria;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPanel {
    active: FilterCriteria,
    draft: FilterCriteria,
}

impl FilterPanel {
    /// Creates a panel whose draft starts as a copy of `active`.
    #[must_use]
    pub fn new(active: FilterCriteria) -> Self {
        Self {
            draft: active.clone(),
            active,
        }
    }

    /// The criteria the lead list is currently filtered by.
    #[must_use]
    pub const fn active(&self) -> &FilterCriteria {
        &self.active
    }

    /// The criteria being edited in the panel.
    #[must_use]
    pub const fn draft(&self) -> &FilterCriteria {
        &self.draft
    }

    /// Resets the draft to the active criteria. Called when the panel opens.
    pub fn begin_edit(&mut self) {
        self.draft = self.active.clone();
    }

    /// Applies an edit to the draft.
    pub fn edit(&mut self, f: impl FnOnce(&mut FilterCriteria)) {
        f(&mut self.draft);
    }

    /// Clears every selection in the draft. The active criteria are
    /// untouched until [`Self::commit`].
    pub fn clear_draft(&mut self) {
        self.draft = self.draft.cleared();
    }

    /// Returns `true` if the draft differs from the active criteria.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.draft != self.active
    }

    /// Replaces the active criteria with the draft.
    pub fn commit(&mut self) -> &FilterCriteria {
        self.active = self.draft.clone();
        &self.active
    }

    /// Throws the draft away, reverting it to the active criteria.
    pub fn discard(&mut self) {
        self.begin_edit();
    }

    /// Updates the live search text.
    ///
    /// Search is applied as the user types, so it lands in both snapshots
    /// without committing any other pending draft edits.
    pub fn set_search(&mut self, query: &str) {
        self.active = FilterCriteria {
            search: query.to_string(),
            ..self.active.clone()
        };
        self.draft.search = query.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_do_not_touch_active_until_commit() {
        let mut panel = FilterPanel::default();
        panel.edit(|draft| draft.has_email = true);

        assert!(panel.draft().has_email);
        assert!(!panel.active().has_email);
        assert!(panel.is_dirty());

        let active = panel.commit();
        assert!(active.has_email);
        assert!(!panel.is_dirty());
    }

    #[test]
    fn discard_reverts_draft() {
        let mut panel = FilterPanel::new(FilterCriteria {
            has_phone: true,
            ..FilterCriteria::default()
        });
        panel.edit(|draft| {
            draft.has_phone = false;
            draft.set_min_score(50);
        });
        panel.discard();

        assert_eq!(panel.draft(), panel.active());
        assert!(panel.active().has_phone);
        assert_eq!(panel.active().min_score, 0);
    }

    #[test]
    fn clear_draft_keeps_active_and_search() {
        let mut panel = FilterPanel::new(FilterCriteria {
            has_website: true,
            search: "plumb".to_string(),
            ..FilterCriteria::default()
        });
        panel.clear_draft();

        assert!(!panel.draft().has_website);
        assert_eq!(panel.draft().search, "plumb");
        assert!(panel.active().has_website);
    }

    #[test]
    fn search_applies_immediately_without_committing_draft() {
        let mut panel = FilterPanel::default();
        panel.edit(|draft| draft.has_socials = true);
        panel.set_search("acme");

        assert_eq!(panel.active().search, "acme");
        assert_eq!(panel.draft().search, "acme");
        assert!(!panel.active().has_socials);
        assert!(panel.draft().has_socials);
    }
}
