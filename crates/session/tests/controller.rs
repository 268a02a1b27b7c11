//! Integration tests for [`SessionController`] against a scripted backend.
//!
//! Concurrency is driven on a single task with `tokio::join!`, mirroring
//! the `current_thread` runtime the front-end uses. Gated backend calls
//! fix the order in which responses arrive.

mod common;

use assert_matches::assert_matches;
use tokio::task::yield_now;

use common::{detail, loaded_controller, summary, two_professor_backend, ScriptedBackend};
use outreach_core::draft::DirtyPolicy;
use outreach_core::filter::InstitutionFilter;
use outreach_session::email_form::EmailMessage;
use outreach_session::view::{DetailView, EmptyState};
use outreach_session::{SelectOutcome, SessionController, SessionError, SessionOptions};

async fn settle() {
    for _ in 0..8 {
        yield_now().await;
    }
}

fn ready_id(view: &DetailView) -> Option<i64> {
    match view {
        DetailView::Ready(detail) => Some(detail.id),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Test: directory loading
// ---------------------------------------------------------------------------

#[tokio::test]
async fn load_populates_list() {
    let controller = loaded_controller(two_professor_backend(), SessionOptions::default()).await;

    let view = controller.list_view();

    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.total_count, 2);
    assert!(view.banner.is_none());
    assert!(view.empty.is_none());
}

#[tokio::test]
async fn first_load_failure_shows_banner_on_empty_list() {
    let backend = ScriptedBackend::default();
    backend.fail_list(Some(503));
    let controller = SessionController::new(backend, SessionOptions::default()).unwrap();

    let err = controller.load().await.unwrap_err();

    assert_matches!(err, SessionError::LoadFailed(_));
    let view = controller.list_view();
    assert_eq!(view.empty, Some(EmptyState::NotLoaded));
    assert!(view.banner.is_some());
}

#[tokio::test]
async fn reload_failure_keeps_previous_list() {
    let controller = loaded_controller(two_professor_backend(), SessionOptions::default()).await;
    controller.backend().fail_list(Some(500));

    assert_matches!(controller.load().await, Err(SessionError::LoadFailed(_)));

    let view = controller.list_view();
    assert_eq!(view.rows.len(), 2);
    assert!(view.banner.is_some());

    controller.backend().fail_list(None);
    controller.load().await.unwrap();
    assert!(controller.list_view().banner.is_none());
}

#[tokio::test]
async fn reload_without_chosen_institution_falls_back_to_all() {
    let controller = loaded_controller(two_professor_backend(), SessionOptions::default()).await;
    controller.set_institution(InstitutionFilter::Only("Y".into()));
    assert_eq!(controller.list_view().rows.len(), 1);

    controller
        .backend()
        .set_directory(vec![summary(1, "Ann Lee", "X"), summary(3, "Cy Ng", "X")]);
    controller.load().await.unwrap();

    let view = controller.list_view();
    assert_eq!(view.filters.institution, InstitutionFilter::All);
    assert_eq!(view.rows.len(), 2);
}

// ---------------------------------------------------------------------------
// Test: filters and pagination
// ---------------------------------------------------------------------------

#[tokio::test]
async fn filter_change_returns_to_first_page() {
    let options = SessionOptions {
        page_size: 1,
        ..SessionOptions::default()
    };
    let controller = loaded_controller(two_professor_backend(), options).await;
    controller.next_page();
    assert_eq!(controller.list_view().page, 2);

    assert!(controller.set_search("ann"));

    let view = controller.list_view();
    assert_eq!(view.page, 1);
    assert_eq!(view.rows[0].name, "Ann Lee");
    assert_eq!(view.total_pages, 1);
}

#[tokio::test]
async fn identical_filters_are_a_no_op() {
    let options = SessionOptions {
        page_size: 1,
        ..SessionOptions::default()
    };
    let controller = loaded_controller(two_professor_backend(), options).await;
    controller.set_recent_only(false);
    controller.next_page();
    let before = controller.list_view();

    assert!(!controller.set_recent_only(false));

    assert_eq!(controller.list_view(), before);
}

#[tokio::test]
async fn zero_page_size_is_rejected() {
    let controller = loaded_controller(two_professor_backend(), SessionOptions::default()).await;

    assert_matches!(controller.set_page_size(0), Err(SessionError::Core(_)));
    assert_eq!(controller.list_view().page_size, 20);
}

// ---------------------------------------------------------------------------
// Test: detail selection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn slow_earlier_selection_never_replaces_later_one() {
    let backend = two_professor_backend();
    let gate = backend.gate_detail(1);
    let controller = loaded_controller(backend, SessionOptions::default()).await;

    let (first, second, ()) = tokio::join!(
        controller.select(1),
        async {
            yield_now().await;
            controller.select(2).await
        },
        async {
            settle().await;
            let _ = gate.send(());
        }
    );

    assert_matches!(first, Ok(SelectOutcome::Superseded));
    assert_matches!(second, Ok(SelectOutcome::Applied));
    assert_eq!(ready_id(&controller.detail_view()), Some(2));
    assert!(controller.draft_text().starts_with("Dear Dr. Kim,"));
    assert_eq!(controller.email_form_view().value, "p2@y.edu");
}

#[tokio::test]
async fn early_stale_response_keeps_newer_selection_loading() {
    let backend = two_professor_backend();
    let gate_first = backend.gate_detail(1);
    let gate_second = backend.gate_detail(2);
    let controller = loaded_controller(backend, SessionOptions::default()).await;

    let (first, second, ()) = tokio::join!(
        controller.select(1),
        async {
            yield_now().await;
            controller.select(2).await
        },
        async {
            settle().await;
            let _ = gate_first.send(());
            settle().await;
            assert_eq!(controller.detail_view(), DetailView::Loading { id: 2 });
            let _ = gate_second.send(());
        }
    );

    assert_matches!(first, Ok(SelectOutcome::Superseded));
    assert_matches!(second, Ok(SelectOutcome::Applied));
    assert_eq!(ready_id(&controller.detail_view()), Some(2));
}

#[tokio::test]
async fn unknown_professor_reports_failure() {
    let controller = loaded_controller(two_professor_backend(), SessionOptions::default()).await;
    controller.select(1).await.unwrap();
    let draft_before = controller.draft_text();

    let err = controller.select(99).await.unwrap_err();

    assert_matches!(err, SessionError::DetailFailed { id: 99, .. });
    assert_matches!(
        controller.detail_view(),
        DetailView::Failed { id: 99, ref message } if message.contains("not found")
    );
    assert_eq!(controller.draft_text(), draft_before);
    assert!(!controller.email_form_view().submit_enabled);
}

#[tokio::test]
async fn selected_row_is_highlighted() {
    let controller = loaded_controller(two_professor_backend(), SessionOptions::default()).await;
    controller.select(2).await.unwrap();

    let rows = controller.list_view().rows;
    assert!(!rows[0].selected);
    assert!(rows[1].selected);
}

// ---------------------------------------------------------------------------
// Test: draft
// ---------------------------------------------------------------------------

#[tokio::test]
async fn edited_draft_survives_new_selection() {
    let controller = loaded_controller(two_professor_backend(), SessionOptions::default()).await;
    controller.select(1).await.unwrap();
    controller.edit_draft("my own words");

    controller.select(2).await.unwrap();

    assert_eq!(controller.draft_text(), "my own words");

    controller.reset_draft();
    assert!(controller.draft_text().starts_with("Dear Dr. Kim,"));
}

#[tokio::test]
async fn reset_policy_regenerates_for_new_professor() {
    let options = SessionOptions {
        draft_policy: DirtyPolicy::ResetOnNewSelection,
        ..SessionOptions::default()
    };
    let controller = loaded_controller(two_professor_backend(), options).await;
    controller.select(1).await.unwrap();
    controller.edit_draft("my own words");

    controller.select(2).await.unwrap();

    assert!(controller.draft_text().starts_with("Dear Dr. Kim,"));
}

// ---------------------------------------------------------------------------
// Test: email updates
// ---------------------------------------------------------------------------

#[tokio::test]
async fn saved_email_reaches_list_and_detail() {
    let controller = loaded_controller(two_professor_backend(), SessionOptions::default()).await;
    controller.select(1).await.unwrap();

    let stored = controller.submit_email(1, " Ann.Lee@X.edu ").await.unwrap();

    assert_eq!(stored, "ann.lee@x.edu");
    let row = &controller.list_view().rows[0];
    assert_eq!(row.email.as_deref(), Some("ann.lee@x.edu"));
    assert_matches!(
        controller.detail_view(),
        DetailView::Ready(ref d) if d.email.as_deref() == Some("ann.lee@x.edu")
    );
    let form = controller.email_form_view();
    assert_eq!(form.value, "ann.lee@x.edu");
    assert_eq!(form.message, Some(EmailMessage::Saved));
    assert!(form.submit_enabled);
}

#[tokio::test]
async fn rejected_email_leaves_stored_value() {
    let controller = loaded_controller(two_professor_backend(), SessionOptions::default()).await;
    controller.select(1).await.unwrap();
    controller.backend().fail_email(Some(422));

    let err = controller.submit_email(1, "ann@").await.unwrap_err();

    assert_matches!(err, SessionError::InvalidEmail(_));
    assert_eq!(controller.list_view().rows[0].email.as_deref(), Some("p1@x.edu"));
    assert_matches!(
        controller.detail_view(),
        DetailView::Ready(ref d) if d.email.as_deref() == Some("p1@x.edu")
    );
    let form = controller.email_form_view();
    assert!(form.submit_enabled);
    assert_eq!(form.value, "ann@");
    assert_eq!(form.message, Some(EmailMessage::InvalidAddress));
}

#[tokio::test]
async fn server_error_keeps_typed_value() {
    let controller = loaded_controller(two_professor_backend(), SessionOptions::default()).await;
    controller.select(1).await.unwrap();
    controller.backend().fail_email(Some(500));

    let err = controller.submit_email(1, "ann@x.edu").await.unwrap_err();

    assert_matches!(err, SessionError::SubmitFailed(_));
    let form = controller.email_form_view();
    assert_eq!(form.value, "ann@x.edu");
    assert_eq!(form.message, Some(EmailMessage::SaveFailed));
    assert!(form.submit_enabled);
}

#[tokio::test]
async fn blank_email_never_reaches_backend() {
    let controller = loaded_controller(two_professor_backend(), SessionOptions::default()).await;
    controller.select(1).await.unwrap();

    let err = controller.submit_email(1, "   ").await.unwrap_err();

    assert_matches!(err, SessionError::Core(_));
    assert_eq!(
        controller
            .backend()
            .email_calls
            .load(std::sync::atomic::Ordering::SeqCst),
        0
    );
    assert_eq!(controller.email_form_view().message, Some(EmailMessage::Empty));
}

#[tokio::test]
async fn second_submission_waits_for_first() {
    let backend = two_professor_backend();
    let gate = backend.gate_email();
    let controller = loaded_controller(backend, SessionOptions::default()).await;
    controller.select(1).await.unwrap();

    let (first, ()) = tokio::join!(controller.submit_email(1, "ann@x.edu"), async {
        settle().await;
        assert!(!controller.email_form_view().submit_enabled);
        let second = controller.submit_email(1, "other@x.edu").await;
        assert_matches!(second, Err(SessionError::SubmitInFlight));
        let _ = gate.send(());
    });

    assert_eq!(first.unwrap(), "ann@x.edu");
    assert_eq!(
        controller
            .backend()
            .email_calls
            .load(std::sync::atomic::Ordering::SeqCst),
        1
    );
}

#[tokio::test]
async fn dropped_submission_reenables_submit() {
    let backend = two_professor_backend();
    let _gate = backend.gate_email();
    let controller = loaded_controller(backend, SessionOptions::default()).await;
    controller.select(1).await.unwrap();

    tokio::select! {
        biased;
        _ = controller.submit_email(1, "ann@x.edu") => panic!("gated submission finished"),
        _ = settle() => {}
    }

    assert!(controller.email_form_view().submit_enabled);
    assert_matches!(
        controller.detail_view(),
        DetailView::Ready(ref d) if d.email.as_deref() == Some("p1@x.edu")
    );
    assert!(controller.submit_email(1, "ann@x.edu").await.is_ok());
}

#[tokio::test]
async fn email_update_for_other_professor_spares_open_form() {
    let controller = loaded_controller(two_professor_backend(), SessionOptions::default()).await;
    controller.select(2).await.unwrap();

    controller.submit_email(1, "ann@x.edu").await.unwrap();

    assert_eq!(controller.list_view().rows[0].email.as_deref(), Some("ann@x.edu"));
    assert_eq!(controller.email_form_view().value, "p2@y.edu");
}

#[tokio::test]
async fn email_saved_while_next_professor_loads_keeps_draft() {
    let backend = two_professor_backend();
    let gate = backend.gate_detail(2);
    let controller = loaded_controller(backend, SessionOptions::default()).await;
    controller.select(1).await.unwrap();

    let (selected, saved, ()) = tokio::join!(
        controller.select(2),
        async {
            yield_now().await;
            controller.submit_email(1, "ann@x.edu").await
        },
        async {
            settle().await;
            assert_eq!(controller.detail_view(), DetailView::Loading { id: 2 });
            assert!(controller.draft_text().starts_with("Dear Dr. Lee,"));
            assert_eq!(controller.email_form_view().message, None);
            let _ = gate.send(());
        }
    );

    assert_matches!(selected, Ok(SelectOutcome::Applied));
    assert_eq!(saved.unwrap(), "ann@x.edu");
    assert_eq!(controller.list_view().rows[0].email.as_deref(), Some("ann@x.edu"));
    assert!(controller.draft_text().starts_with("Dear Dr. Kim,"));
}

#[tokio::test]
async fn reset_policy_keeps_edits_until_next_professor_arrives() {
    let backend = two_professor_backend();
    let gate = backend.gate_detail(2);
    let options = SessionOptions {
        draft_policy: DirtyPolicy::ResetOnNewSelection,
        ..SessionOptions::default()
    };
    let controller = loaded_controller(backend, options).await;
    controller.select(1).await.unwrap();
    controller.edit_draft("my own words");

    let (selected, saved, ()) = tokio::join!(
        controller.select(2),
        async {
            yield_now().await;
            controller.submit_email(1, "ann@x.edu").await
        },
        async {
            settle().await;
            assert_eq!(controller.draft_text(), "my own words");
            let _ = gate.send(());
        }
    );

    assert_matches!(selected, Ok(SelectOutcome::Applied));
    assert!(saved.is_ok());
    assert!(controller.draft_text().starts_with("Dear Dr. Kim,"));
}

#[tokio::test]
async fn failed_save_for_previous_professor_leaves_form_quiet() {
    let backend = two_professor_backend();
    backend.fail_email(Some(503));
    let gate = backend.gate_email();
    let controller = loaded_controller(backend, SessionOptions::default()).await;
    controller.select(1).await.unwrap();

    let (saved, selected, ()) = tokio::join!(
        controller.submit_email(1, "ann@x.edu"),
        async {
            yield_now().await;
            controller.select(2).await
        },
        async {
            settle().await;
            let _ = gate.send(());
        }
    );

    assert_matches!(saved, Err(SessionError::SubmitFailed(_)));
    assert_matches!(selected, Ok(SelectOutcome::Applied));
    let form = controller.email_form_view();
    assert_eq!(form.value, "p2@y.edu");
    assert_eq!(form.message, None);
    assert!(form.submit_enabled);
}

// ---------------------------------------------------------------------------
// Test: health and snapshots
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_backend_status() {
    let controller = loaded_controller(two_professor_backend(), SessionOptions::default()).await;
    let status = controller.check_health().await.unwrap();
    assert!(status.ok);
    assert!(!status.offline);
}

#[tokio::test]
async fn snapshot_serializes_whole_session() {
    let backend = ScriptedBackend::with_directory(
        vec![summary(7, "Dee Fox", "Z")],
        vec![detail(7, "Dee Fox", "Z")],
    );
    let controller = loaded_controller(backend, SessionOptions::default()).await;
    controller.select(7).await.unwrap();

    let json = serde_json::to_value(controller.snapshot()).unwrap();

    assert_eq!(json["detail"]["state"]["status"], "ready");
    assert_eq!(json["store"]["professors"][0]["name"], "Dee Fox");
}
