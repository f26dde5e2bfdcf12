use chrono::{NaiveDateTime, NaiveTime};
use tripnest_core::{
    parse_date, resolve_permissions, resolve_status, start_of_day, summarize, ActivityKind,
    ChildSummary, FailureReason, ItineraryStatus, PackingUnit, PermissionVector,
    ScheduledActivity,
};

fn day(text: &str) -> NaiveDateTime {
    start_of_day(parse_date(text).valid().expect("test date should parse"))
}

fn at(text: &str, hour: u32, minute: u32) -> NaiveDateTime {
    let time = NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time");
    parse_date(text)
        .valid()
        .expect("test date should parse")
        .and_time(time)
}

fn trip(start: Option<&str>, end: Option<&str>) -> ScheduledActivity {
    ScheduledActivity::new(ActivityKind::Trip).with_schedule(start, end)
}

fn relocation(start: &str) -> ScheduledActivity {
    ScheduledActivity::new(ActivityKind::Relocation).with_schedule(Some(start), None)
}

#[test]
fn trip_before_start_is_pending_and_fully_editable() {
    let activity = trip(Some("15/03/2025"), None);
    let result = resolve_status(&activity, ChildSummary::default(), day("10/03/2025"));

    assert_eq!(result.status, ItineraryStatus::Pending);
    assert!(!result.on_exact_scheduled_day);
    assert_eq!(resolve_permissions(&result), PermissionVector::ALL_ALLOWED);
}

#[test]
fn relocation_on_start_day_without_units_fails_recoverably() {
    let activity = relocation("15/03/2025");
    let units: Vec<PackingUnit> = Vec::new();
    let result = resolve_status(&activity, summarize(&units), day("15/03/2025"));

    assert_eq!(result.status, ItineraryStatus::Failed(FailureReason::NoneAtAll));
    assert!(result.on_exact_scheduled_day);
    let permissions = resolve_permissions(&result);
    assert!(permissions.can_add_child);
    assert!(!permissions.can_delete_parent);
}

#[test]
fn relocation_on_start_day_with_only_empty_units_fails_recoverably() {
    let activity = relocation("15/03/2025");
    let units = vec![PackingUnit::empty(activity.id)];
    let result = resolve_status(&activity, summarize(&units), day("15/03/2025"));

    assert_eq!(result.status, ItineraryStatus::Failed(FailureReason::EmptyUnits));
    assert_eq!(result.failure_reason(), Some(FailureReason::EmptyUnits));
    assert!(resolve_permissions(&result).can_add_child);
}

#[test]
fn relocation_after_start_day_with_packed_unit_is_completed() {
    let activity = relocation("01/01/2025");
    let units = vec![PackingUnit::new(activity.id, vec!["passport".to_string()])];
    let result = resolve_status(&activity, summarize(&units), day("01/06/2025"));

    assert_eq!(result.status, ItineraryStatus::Completed);
    let permissions = resolve_permissions(&result);
    assert!(permissions.can_delete_parent);
    assert!(!permissions.can_add_child);
}

#[test]
fn trip_inside_window_is_in_progress_and_locked() {
    let activity = trip(Some("01/01/2025"), Some("10/01/2025"));
    let result = resolve_status(&activity, ChildSummary::default(), day("05/01/2025"));

    assert_eq!(result.status, ItineraryStatus::InProgress);
    assert_eq!(resolve_permissions(&result), PermissionVector::NONE_ALLOWED);
}

#[test]
fn unparseable_start_date_is_planned_and_fully_editable() {
    let activity = trip(Some("not-a-date"), None);
    let result = resolve_status(&activity, ChildSummary::default(), day("05/01/2025"));

    assert_eq!(result.status, ItineraryStatus::Planned);
    assert_eq!(resolve_permissions(&result), PermissionVector::ALL_ALLOWED);
}

#[test]
fn missing_start_date_is_planned_for_every_kind_and_summary() {
    let now = at("20/07/2025", 18, 30);
    for kind in [ActivityKind::Trip, ActivityKind::Relocation] {
        for summary in [
            ChildSummary::new(0, 0),
            ChildSummary::new(3, 0),
            ChildSummary::new(3, 3),
        ] {
            let activity = ScheduledActivity::new(kind);
            let result = resolve_status(&activity, summary, now);
            assert_eq!(result.status, ItineraryStatus::Planned);
            assert_eq!(resolve_permissions(&result), PermissionVector::ALL_ALLOWED);
        }
    }
}

#[test]
fn relocation_on_start_day_with_packed_unit_is_in_progress() {
    let activity = relocation("15/03/2025");
    let result = resolve_status(&activity, ChildSummary::new(2, 1), at("15/03/2025", 23, 59));

    assert_eq!(result.status, ItineraryStatus::InProgress);
    assert!(result.on_exact_scheduled_day);
    assert_eq!(resolve_permissions(&result), PermissionVector::NONE_ALLOWED);
}

#[test]
fn relocation_same_day_uses_calendar_day_not_time_of_day() {
    let activity = relocation("15/03/2025");
    for (hour, minute) in [(0, 0), (9, 15), (23, 59)] {
        let now = at("15/03/2025", hour, minute);
        let result = resolve_status(&activity, ChildSummary::default(), now);
        assert_eq!(result.status, ItineraryStatus::Failed(FailureReason::NoneAtAll));
        assert!(result.on_exact_scheduled_day);
    }
}

#[test]
fn relocation_discovered_after_the_fact_only_allows_deleting_parent() {
    let activity = relocation("15/03/2025");
    let result = resolve_status(&activity, ChildSummary::new(2, 0), at("16/03/2025", 0, 1));

    assert_eq!(result.status, ItineraryStatus::Failed(FailureReason::EmptyUnits));
    assert!(!result.on_exact_scheduled_day);
    let permissions = resolve_permissions(&result);
    assert!(permissions.can_delete_parent);
    assert!(!permissions.can_add_child);
    assert!(!permissions.can_edit_child);
    assert!(!permissions.can_delete_child);
    assert!(!permissions.can_edit_parent);
}

#[test]
fn relocation_before_start_day_is_pending_regardless_of_units() {
    let activity = relocation("15/03/2025");
    let result = resolve_status(&activity, ChildSummary::default(), at("14/03/2025", 23, 59));
    assert_eq!(result.status, ItineraryStatus::Pending);
}

#[test]
fn trip_is_in_progress_from_first_instant_of_start_day() {
    let activity = trip(Some("15/03/2025"), None);
    assert_eq!(
        resolve_status(&activity, ChildSummary::default(), at("14/03/2025", 23, 59)).status,
        ItineraryStatus::Pending
    );
    assert_eq!(
        resolve_status(&activity, ChildSummary::default(), day("15/03/2025")).status,
        ItineraryStatus::InProgress
    );
}

#[test]
fn open_ended_trip_stays_in_progress() {
    let activity = trip(Some("01/01/2025"), None);
    let result = resolve_status(&activity, ChildSummary::default(), day("31/12/2030"));
    assert_eq!(result.status, ItineraryStatus::InProgress);
}

#[test]
fn trip_with_unparseable_end_date_is_treated_as_open_ended() {
    let activity = trip(Some("01/01/2025"), Some("whenever"));
    let result = resolve_status(&activity, ChildSummary::default(), day("01/02/2026"));
    assert_eq!(result.status, ItineraryStatus::InProgress);
}

#[test]
fn trip_after_end_instant_is_completed() {
    let activity = trip(Some("01/01/2025"), Some("10/01/2025"));

    let on_end = resolve_status(&activity, ChildSummary::default(), day("10/01/2025"));
    assert_eq!(on_end.status, ItineraryStatus::InProgress);

    let after_end = resolve_status(&activity, ChildSummary::default(), at("10/01/2025", 8, 0));
    assert_eq!(after_end.status, ItineraryStatus::Completed);
    assert_eq!(
        resolve_permissions(&after_end),
        PermissionVector {
            can_edit_parent: false,
            can_delete_parent: true,
            can_add_child: false,
            can_edit_child: false,
            can_delete_child: false,
        }
    );
}

#[test]
fn trip_never_fails_even_without_units() {
    let activity = trip(Some("01/01/2025"), Some("03/01/2025"));
    for now in [day("01/01/2025"), day("02/01/2025"), day("04/01/2025")] {
        let result = resolve_status(&activity, ChildSummary::default(), now);
        assert!(!result.status.is_failed());
    }
}

#[test]
fn trip_requiring_completeness_follows_calendar_day_rules() {
    let activity = trip(Some("01/01/2025"), Some("05/01/2025")).with_child_completeness(true);

    let on_day = resolve_status(&activity, ChildSummary::default(), at("01/01/2025", 12, 0));
    assert_eq!(on_day.status, ItineraryStatus::Failed(FailureReason::NoneAtAll));
    assert!(on_day.on_exact_scheduled_day);

    let later = resolve_status(&activity, ChildSummary::new(1, 1), day("03/01/2025"));
    assert_eq!(later.status, ItineraryStatus::Completed);
}

#[test]
fn status_is_reevaluated_from_scratch_when_inputs_change() {
    let activity = relocation("15/03/2025");
    let now = day("20/03/2025");

    let failed = resolve_status(&activity, ChildSummary::new(1, 0), now);
    assert!(failed.status.is_failed());

    let recovered = resolve_status(&activity, ChildSummary::new(2, 1), now);
    assert_eq!(recovered.status, ItineraryStatus::Completed);

    let rescheduled = relocation("01/04/2025");
    let pending = resolve_status(&rescheduled, ChildSummary::new(1, 0), now);
    assert_eq!(pending.status, ItineraryStatus::Pending);
}

#[test]
fn resolve_status_is_idempotent() {
    let activities = [
        trip(Some("01/01/2025"), Some("10/01/2025")),
        relocation("15/03/2025"),
        trip(Some("bad"), None),
    ];
    let nows = [day("01/01/2025"), at("15/03/2025", 10, 0), day("01/06/2025")];
    let summaries = [
        ChildSummary::new(0, 0),
        ChildSummary::new(1, 0),
        ChildSummary::new(4, 2),
    ];

    for activity in &activities {
        for now in nows {
            for summary in summaries {
                assert_eq!(
                    resolve_status(activity, summary, now),
                    resolve_status(activity, summary, now)
                );
            }
        }
    }
}

#[test]
fn in_progress_never_permits_any_mutation() {
    let activities = [
        trip(Some("01/01/2025"), Some("10/01/2025")),
        trip(Some("01/01/2025"), None),
        relocation("01/01/2025"),
    ];
    let nows = [
        day("31/12/2024"),
        day("01/01/2025"),
        at("05/01/2025", 13, 0),
        day("11/01/2025"),
    ];
    let summaries = [
        ChildSummary::new(0, 0),
        ChildSummary::new(2, 0),
        ChildSummary::new(2, 2),
    ];

    for activity in &activities {
        for now in nows {
            for summary in summaries {
                let result = resolve_status(activity, summary, now);
                if result.status == ItineraryStatus::InProgress {
                    assert!(!resolve_permissions(&result).any());
                }
            }
        }
    }
}
