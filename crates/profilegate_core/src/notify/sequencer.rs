//! Notification sequencer for the entry-success and validation-error banners.

use crate::model::identity::ValidationErrorSet;
use crate::notify::timer::{TimerId, TimerQueue};
use crate::notify::{EpochMs, BANNER_DURATION_MS};
use log::debug;

const SUCCESS_TITLE: &str = "Success";
const SUCCESS_MESSAGE: &str = "Your details were saved.";
const ERROR_TITLE: &str = "Error";

/// Identifies one of the two independent banners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BannerSlot {
    EntrySuccess,
    ValidationError,
}

impl BannerSlot {
    fn as_str(self) -> &'static str {
        match self {
            Self::EntrySuccess => "entry_success",
            Self::ValidationError => "validation_error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Visible banner contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: &'static str,
    pub messages: Vec<String>,
    pub visible_until: EpochMs,
}

/// Why a banner went away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    Timeout,
    Manual,
}

/// Side effect the owner must apply after a dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissEffect {
    /// Replace the browse route with its marker-free form.
    CanonicalizeRoute,
    /// Clear all three intake field flags together.
    ClearFieldErrors,
}

#[derive(Debug, Default)]
struct Banner {
    notification: Option<Notification>,
    timer: Option<TimerId>,
}

/// Owns both banners and the timers that dismiss them.
#[derive(Debug, Default)]
pub struct NotificationSequencer {
    timers: TimerQueue<BannerSlot>,
    entry_success: Banner,
    validation_error: Banner,
}

impl NotificationSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows the entry-success banner for [`BANNER_DURATION_MS`].
    pub fn entered_with_success_marker(&mut self, now: EpochMs) {
        self.show(
            BannerSlot::EntrySuccess,
            Notification {
                kind: NotificationKind::Success,
                title: SUCCESS_TITLE,
                messages: vec![SUCCESS_MESSAGE.to_string()],
                visible_until: now + BANNER_DURATION_MS,
            },
        );
    }

    /// Shows the validation-error banner listing every failing field.
    ///
    /// An empty error set is ignored.
    pub fn validation_failed(&mut self, errors: &ValidationErrorSet, now: EpochMs) {
        if errors.is_empty() {
            return;
        }
        self.show(
            BannerSlot::ValidationError,
            Notification {
                kind: NotificationKind::Error,
                title: ERROR_TITLE,
                messages: errors.messages(),
                visible_until: now + BANNER_DURATION_MS,
            },
        );
    }

    pub fn visible(&self, slot: BannerSlot) -> Option<&Notification> {
        self.banner(slot).notification.as_ref()
    }

    /// Manual close. Returns `None` when the banner was not showing.
    pub fn dismiss(&mut self, slot: BannerSlot) -> Option<DismissEffect> {
        self.close(slot, DismissReason::Manual)
    }

    /// Fires due auto-dismiss timers and returns their effects in order.
    pub fn tick(&mut self, now: EpochMs) -> Vec<DismissEffect> {
        let mut effects = Vec::new();
        for (id, slot) in self.timers.take_due(now) {
            let banner = self.banner_mut(slot);
            if banner.timer != Some(id) {
                continue;
            }
            banner.timer = None;
            if let Some(effect) = self.close(slot, DismissReason::Timeout) {
                effects.push(effect);
            }
        }
        effects
    }

    /// Drops a banner and cancels its timer without emitting an effect.
    ///
    /// Called when the view owning the banner is torn down.
    pub fn teardown(&mut self, slot: BannerSlot) {
        let banner = self.banner_mut(slot);
        let timer = banner.timer.take();
        let was_visible = banner.notification.take().is_some();
        if let Some(id) = timer {
            self.timers.cancel(id);
        }
        if was_visible {
            debug!("event=banner_teardown module=notify slot={}", slot.as_str());
        }
    }

    /// Number of live dismiss timers.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    fn show(&mut self, slot: BannerSlot, notification: Notification) {
        let deadline = notification.visible_until;
        if let Some(previous) = self.banner_mut(slot).timer.take() {
            self.timers.cancel(previous);
        }
        let id = self.timers.schedule(deadline, slot);
        let banner = self.banner_mut(slot);
        banner.notification = Some(notification);
        banner.timer = Some(id);
        debug!(
            "event=banner_show module=notify slot={} visible_until={deadline}",
            slot.as_str()
        );
    }

    fn close(&mut self, slot: BannerSlot, reason: DismissReason) -> Option<DismissEffect> {
        let banner = self.banner_mut(slot);
        banner.notification.take()?;
        if let Some(id) = banner.timer.take() {
            self.timers.cancel(id);
        }
        debug!(
            "event=banner_dismiss module=notify slot={} reason={reason:?}",
            slot.as_str()
        );
        Some(match slot {
            BannerSlot::EntrySuccess => DismissEffect::CanonicalizeRoute,
            BannerSlot::ValidationError => DismissEffect::ClearFieldErrors,
        })
    }

    fn banner(&self, slot: BannerSlot) -> &Banner {
        match slot {
            BannerSlot::EntrySuccess => &self.entry_success,
            BannerSlot::ValidationError => &self.validation_error,
        }
    }

    fn banner_mut(&mut self, slot: BannerSlot) -> &mut Banner {
        match slot {
            BannerSlot::EntrySuccess => &mut self.entry_success,
            BannerSlot::ValidationError => &mut self.validation_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BannerSlot, DismissEffect, NotificationKind, NotificationSequencer};
    use crate::model::identity::ValidationErrorSet;

    #[test]
    fn success_banner_expires_after_three_seconds() {
        let mut sequencer = NotificationSequencer::new();
        sequencer.entered_with_success_marker(1_000);

        assert!(sequencer.tick(3_999).is_empty());
        assert!(sequencer.visible(BannerSlot::EntrySuccess).is_some());

        assert_eq!(sequencer.tick(4_000), vec![DismissEffect::CanonicalizeRoute]);
        assert!(sequencer.visible(BannerSlot::EntrySuccess).is_none());
    }

    #[test]
    fn manual_dismiss_cancels_timer() {
        let mut sequencer = NotificationSequencer::new();
        let errors = ValidationErrorSet {
            name: true,
            phone_number: false,
            email: true,
        };
        sequencer.validation_failed(&errors, 0);
        let banner = sequencer.visible(BannerSlot::ValidationError).unwrap();
        assert_eq!(banner.kind, NotificationKind::Error);
        assert_eq!(banner.messages.len(), 2);

        assert_eq!(
            sequencer.dismiss(BannerSlot::ValidationError),
            Some(DismissEffect::ClearFieldErrors)
        );
        assert_eq!(sequencer.pending_timers(), 0);
        assert!(sequencer.tick(10_000).is_empty());
        assert_eq!(sequencer.dismiss(BannerSlot::ValidationError), None);
    }

    #[test]
    fn reshow_restarts_window() {
        let mut sequencer = NotificationSequencer::new();
        let errors = ValidationErrorSet {
            name: true,
            ..ValidationErrorSet::default()
        };
        sequencer.validation_failed(&errors, 0);
        sequencer.validation_failed(&errors, 2_000);

        assert!(sequencer.tick(3_000).is_empty());
        assert_eq!(sequencer.tick(5_000), vec![DismissEffect::ClearFieldErrors]);
    }

    #[test]
    fn banners_are_independent() {
        let mut sequencer = NotificationSequencer::new();
        sequencer.entered_with_success_marker(0);
        sequencer.validation_failed(
            &ValidationErrorSet {
                email: true,
                ..ValidationErrorSet::default()
            },
            1_000,
        );

        sequencer.dismiss(BannerSlot::EntrySuccess);
        assert!(sequencer.visible(BannerSlot::ValidationError).is_some());
    }

    #[test]
    fn teardown_emits_no_effect() {
        let mut sequencer = NotificationSequencer::new();
        sequencer.entered_with_success_marker(0);
        sequencer.teardown(BannerSlot::EntrySuccess);

        assert_eq!(sequencer.pending_timers(), 0);
        assert!(sequencer.tick(10_000).is_empty());
    }
}
