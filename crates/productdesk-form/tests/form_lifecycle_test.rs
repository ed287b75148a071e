//! End-to-end behaviour of the product form against recording fakes.
//!
//! Run with: `cargo test -p productdesk-form --test form_lifecycle_test`

mod helpers;

use std::time::Duration;

use helpers::{ok, refused, widget_data, Entry, Harness, Reply};
use productdesk_core::models::{FormMode, PhotoRef, ProductInput, RouteContext, UploadFile};
use productdesk_core::{Severity, SubmitError};
use productdesk_form::submission::VALIDATION_MESSAGE;
use productdesk_form::{Field, FormCommand, FormEvent, FormRuntime, Operation, Phase, SubmitOutcome};

fn fill_widget(form: &mut productdesk_form::ProductForm) {
    form.set_field(Field::Name, "Widget");
    form.set_field(Field::ShortDescription, "A small widget");
    form.set_field(Field::Website, "https://widget.example");
}

#[tokio::test]
async fn create_sends_current_draft_without_photo() {
    let (mut form, journal) = Harness::new().form(FormMode::Adding, RouteContext::default());
    fill_widget(&mut form);

    form.submit_create().await;

    assert_eq!(
        journal.api_calls(),
        vec![Entry::Create {
            input: ProductInput {
                slug: None,
                name: "Widget".into(),
                short_description: "A small widget".into(),
                full_description: String::new(),
                website: "https://widget.example".into(),
                video_url: String::new(),
            },
            file: None,
        }]
    );
}

#[tokio::test]
async fn create_success_navigates_home_then_notifies() {
    let (mut form, journal) = Harness::new()
        .reply(Reply::Respond(ok("Created", None)))
        .form(FormMode::Adding, RouteContext::default());
    fill_widget(&mut form);

    let outcome = form.submit_create().await;

    assert!(outcome.is_success());
    let entries = journal.entries();
    assert!(matches!(entries[0], Entry::Create { .. }));
    assert_eq!(entries[1], Entry::Navigate("/".into()));
    assert_eq!(entries[2], Entry::Notify(Severity::Success, "Created".into()));
    assert_eq!(entries.len(), 3);
    // Left busy; the navigation tears the form down.
    assert!(form.is_busy());
    assert_eq!(form.phase(), Phase::Succeeded(Operation::Create));
}

#[tokio::test]
async fn create_refused_by_server_resets_busy() {
    let (mut form, journal) = Harness::new()
        .reply(Reply::Respond(refused("Name already taken")))
        .form(FormMode::Adding, RouteContext::default());
    fill_widget(&mut form);

    let outcome = form.submit_create().await;

    assert!(matches!(
        outcome,
        SubmitOutcome::Failed {
            operation: Operation::Create,
            error: SubmitError::Rejected(_)
        }
    ));
    assert!(journal.navigations().is_empty());
    assert_eq!(
        journal.notifications(),
        vec![(Severity::Error, "Name already taken".to_string())]
    );
    assert!(!form.is_busy());
    assert_eq!(form.phase(), Phase::Idle);
}

#[tokio::test]
async fn update_success_redirects_to_new_slug() {
    let (mut form, journal) = Harness::new()
        .reply(Reply::Respond(ok("Saved", Some("widget-2"))))
        .form(
            FormMode::Editing(widget_data()),
            RouteContext::for_product("widget"),
        );

    let outcome = form.submit_update().await;

    match outcome {
        SubmitOutcome::Succeeded { destination, .. } => {
            assert_eq!(destination, "/products/widget-2/")
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    let entries = journal.entries();
    assert_eq!(
        entries[1..],
        [
            Entry::Navigate("/".into()),
            Entry::Navigate("/products/widget-2/".into()),
            Entry::Notify(Severity::Success, "Saved".into()),
        ]
    );
}

#[tokio::test]
async fn update_sends_slug_and_persisted_photo() {
    let (mut form, journal) = Harness::new().form(
        FormMode::Editing(widget_data()),
        RouteContext::for_product("widget"),
    );
    form.set_field(Field::Name, "Widget Pro");

    form.submit_update().await;

    match &journal.api_calls()[0] {
        Entry::Update { input, file } => {
            assert_eq!(input.slug.as_deref(), Some("widget"));
            assert_eq!(input.name, "Widget Pro");
            assert_eq!(input.full_description, "<p>Widgets</p>");
            assert_eq!(
                file,
                &Some(PhotoRef::Persisted("https://cdn.example/widget.png".into()))
            );
        }
        other => panic!("unexpected call: {:?}", other),
    }
}

#[tokio::test]
async fn long_persisted_short_description_is_sent_unchanged() {
    let long = "x".repeat(300);
    let data = productdesk_core::models::ProductData {
        short_description: long.clone(),
        ..widget_data()
    };
    let (mut form, journal) = Harness::new().form(
        FormMode::Editing(data),
        RouteContext::for_product("widget"),
    );
    assert_eq!(form.store().short_description_count(), 300);

    form.submit_update().await;

    match &journal.api_calls()[0] {
        Entry::Update { input, .. } => assert_eq!(input.short_description, long),
        other => panic!("unexpected call: {:?}", other),
    }
}

#[tokio::test]
async fn fresh_upload_replaces_photo_in_payload() {
    let (mut form, journal) = Harness::new().form(
        FormMode::Editing(widget_data()),
        RouteContext::for_product("widget"),
    );
    assert_eq!(form.files().len(), 1);

    form.on_file_list_change(vec![UploadFile {
        uid: "rc-upload-1".into(),
        thumb_url: Some("data:image/png;base64,AAAA".into()),
        ..Default::default()
    }]);
    form.submit_update().await;

    match &journal.api_calls()[0] {
        Entry::Update { file, .. } => assert_eq!(
            file,
            &Some(PhotoRef::Fresh("data:image/png;base64,AAAA".into()))
        ),
        other => panic!("unexpected call: {:?}", other),
    }
}

#[tokio::test]
async fn missing_required_fields_block_create_and_update() {
    let (mut form, journal) = Harness::new().form(FormMode::Adding, RouteContext::default());
    form.set_field(Field::Name, "Widget");
    form.set_field(Field::Website, "https://widget.example");

    let create = form.submit_create().await;
    assert!(matches!(
        create,
        SubmitOutcome::Rejected {
            error: SubmitError::Validation(_),
            ..
        }
    ));
    assert!(!form.is_busy());

    let update = form.submit_update().await;
    assert!(matches!(update, SubmitOutcome::Rejected { .. }));

    assert!(journal.api_calls().is_empty());
    assert_eq!(
        journal.notifications(),
        vec![
            (Severity::Error, VALIDATION_MESSAGE.to_string()),
            (Severity::Error, VALIDATION_MESSAGE.to_string()),
        ]
    );
}

#[tokio::test]
async fn transport_failure_uses_generic_message() {
    let (mut form, journal) = Harness::new()
        .reply(Reply::TransportError("connection reset"))
        .form(
            FormMode::Editing(widget_data()),
            RouteContext::for_product("widget"),
        );

    let outcome = form.submit_update().await;

    assert!(matches!(
        outcome,
        SubmitOutcome::Failed {
            error: SubmitError::Transport { .. },
            ..
        }
    ));
    assert_eq!(
        journal.notifications(),
        vec![(Severity::Error, "Error with product updating".to_string())]
    );
    assert!(journal.navigations().is_empty());
    assert!(!form.is_busy());
}

#[tokio::test]
async fn hung_write_times_out_and_resets_busy() {
    let (mut form, journal) = Harness::new()
        .reply(Reply::Hang)
        .submit_timeout(Duration::from_millis(50))
        .form(FormMode::Adding, RouteContext::default());
    fill_widget(&mut form);

    let outcome = form.submit_create().await;

    assert!(matches!(
        outcome,
        SubmitOutcome::Failed {
            error: SubmitError::TimedOut(_),
            ..
        }
    ));
    assert_eq!(
        journal.notifications(),
        vec![(Severity::Error, "Error with product creation".to_string())]
    );
    assert!(!form.is_busy());
}

#[tokio::test]
async fn navigation_failure_suppresses_success_notice() {
    let (mut form, journal) = Harness::new()
        .failing_navigator()
        .form(FormMode::Adding, RouteContext::default());
    fill_widget(&mut form);

    let outcome = form.submit_create().await;

    assert!(matches!(outcome, SubmitOutcome::NavigationFailed { .. }));
    assert!(journal.notifications().is_empty());
}

#[tokio::test]
async fn update_counter_fires_once_per_increment() {
    let (mut form, journal) = Harness::new().form(
        FormMode::Editing(widget_data()),
        RouteContext::for_product("widget"),
    );

    assert!(form.observe_update_count(0).await.is_none());
    assert!(form.observe_update_count(1).await.is_some());
    assert!(form.observe_update_count(1).await.is_none());
    assert!(form.observe_update_count(2).await.is_some());

    assert_eq!(journal.api_calls().len(), 2);
}

#[tokio::test]
async fn delete_counter_deletes_route_slug_once() {
    let (form, journal) = Harness::new().reply(Reply::Respond(ok("Deleted", None))).form(
        FormMode::Editing(widget_data()),
        RouteContext::for_product("widget"),
    );
    let (handle, mut outcomes, task) = FormRuntime::spawn(form);

    handle.send(FormEvent::DeleteCountChanged(1)).await.unwrap();
    handle.send(FormEvent::DeleteCountChanged(1)).await.unwrap();
    let snapshot = handle.snapshot().await.unwrap();
    drop(handle);
    task.await.unwrap();

    assert_eq!(journal.api_calls(), vec![Entry::Delete("widget".into())]);
    let outcome = outcomes.recv().await.unwrap();
    assert_eq!(outcome.operation(), Operation::Delete);
    assert!(outcome.is_success());
    assert!(outcomes.recv().await.is_none());
    assert!(snapshot.busy);
    assert_eq!(
        journal.notifications(),
        vec![(Severity::Success, "Deleted".to_string())]
    );
}

#[tokio::test]
async fn delete_without_route_slug_makes_no_call() {
    let (mut form, journal) = Harness::new().form(FormMode::Adding, RouteContext::default());

    let outcome = form.submit_delete().await;

    assert!(matches!(
        outcome,
        SubmitOutcome::Rejected {
            error: SubmitError::MissingSlug,
            ..
        }
    ));
    assert!(journal.api_calls().is_empty());
    assert!(!form.is_busy());
    assert_eq!(
        journal.notifications(),
        vec![(Severity::Error, "Error with product deletion".to_string())]
    );
}

#[tokio::test]
async fn queued_edits_apply_before_queued_submit() {
    let (form, journal) = Harness::new().form(FormMode::Adding, RouteContext::default());
    let (handle, mut outcomes, _task) = FormRuntime::spawn(form);

    handle.edit(Field::Name, "Widget").await.unwrap();
    handle.edit(Field::ShortDescription, "A small widget").await.unwrap();
    handle.edit(Field::Website, "https://widget.example").await.unwrap();
    handle
        .set_files(vec![UploadFile {
            uid: "rc-upload-9".into(),
            thumb_url: Some("data:T".into()),
            ..Default::default()
        }])
        .await
        .unwrap();
    handle.request(FormCommand::Create).await.unwrap();

    let outcome = outcomes.recv().await.unwrap();
    assert!(outcome.is_success());
    match &journal.api_calls()[0] {
        Entry::Create { input, file } => {
            assert_eq!(input.name, "Widget");
            assert_eq!(file, &Some(PhotoRef::Fresh("data:T".into())));
        }
        other => panic!("unexpected call: {:?}", other),
    }
}

#[tokio::test]
async fn back_command_navigates_back() {
    let (mut form, journal) = Harness::new().form(FormMode::Adding, RouteContext::default());

    assert!(form.execute(FormCommand::Back).await.is_none());
    assert_eq!(journal.entries(), vec![Entry::Back]);
}
