mod common;

use common::{ids, plain_output, record, value, ScriptedInteraction, Step, SIX_USERS};
use user_admin::cli::interaction::{
    BrowseAction, ConfirmationResponse, DetailsAction, PromptResponse,
};
use user_admin::cli::{App, Flow};
use user_admin::coordinator::{ActiveMode, ViewState};
use user_admin::domain::UpdateRequest;
use user_admin::errors::ClientError;
use user_admin::forms::Field;
use user_admin::notify::Notification;
use user_admin::transport::{InMemoryTransport, Operation, TransportCall};

fn app_with(records: Vec<user_admin::domain::Record>) -> App<InMemoryTransport> {
    plain_output();
    App::new(InMemoryTransport::with_records(records), 5)
}

#[test]
fn quitting_fetches_once_and_stops() {
    let mut app = app_with(SIX_USERS.clone());
    let mut script = ScriptedInteraction::new(vec![Step::Browse(BrowseAction::Quit)]);

    app.run(&mut script);

    assert_eq!(app.transport().calls(), vec![TransportCall::List]);
    assert!(script.is_exhausted());
}

#[test]
fn paging_actions_follow_position() {
    let mut app = app_with(SIX_USERS.clone());
    let mut script = ScriptedInteraction::new(vec![
        Step::Browse(BrowseAction::NextPage),
        Step::Browse(BrowseAction::Quit),
    ]);

    app.run(&mut script);

    let first = &script.offered_actions[0];
    assert!(first.contains(&BrowseAction::NextPage));
    assert!(!first.contains(&BrowseAction::PreviousPage));
    let second = &script.offered_actions[1];
    assert!(second.contains(&BrowseAction::PreviousPage));
    assert!(!second.contains(&BrowseAction::NextPage));
    assert_eq!(ids(app.list().visible_page()), vec!["F"]);
    assert_eq!(app.transport().calls_of(Operation::List), 1);
}

#[test]
fn empty_list_only_offers_add() {
    let mut app = app_with(Vec::new());
    let mut script = ScriptedInteraction::new(vec![Step::Browse(BrowseAction::Quit)]);
    app.run(&mut script);
    assert_eq!(
        script.offered_actions[0],
        vec![BrowseAction::Add, BrowseAction::Refresh, BrowseAction::Quit]
    );
}

#[test]
fn adding_a_user_returns_to_a_refetched_list() {
    let mut app = app_with(vec![record("A")]);
    let mut script = ScriptedInteraction::new(vec![
        Step::Browse(BrowseAction::Add),
        value("newbie"),
        value("secret"),
        value("New"),
        value("Bie"),
        value("2001-02-03"),
        Step::Submit(ConfirmationResponse::Confirm),
        Step::Browse(BrowseAction::Quit),
    ]);

    app.run(&mut script);

    assert_eq!(
        script.prompted_fields,
        vec![
            Field::Username,
            Field::Password,
            Field::FirstName,
            Field::LastName,
            Field::DateOfBirth
        ]
    );
    assert!(script.submit_summaries[0].contains(&"Password: ******".to_string()));
    assert_eq!(app.transport().calls_of(Operation::Create), 1);
    assert_eq!(app.transport().calls_of(Operation::List), 2);
    assert_eq!(app.list().records().len(), 2);
    assert_eq!(app.coordinator().state(), &ViewState::Browsing);
}

#[test]
fn invalid_answers_are_asked_again() {
    let mut app = app_with(Vec::new());
    let mut script = ScriptedInteraction::new(vec![
        Step::Browse(BrowseAction::Add),
        value("al"),
        value("pw"),
        value("Al"),
        value("Ng"),
        value("not-a-date"),
        value("1990-01-01"),
        Step::Submit(ConfirmationResponse::Cancel),
        Step::Browse(BrowseAction::Quit),
    ]);

    app.run(&mut script);

    assert_eq!(
        script.prompted_fields.last(),
        Some(&Field::DateOfBirth)
    );
    assert_eq!(script.prompted_fields.len(), 6);
    assert_eq!(app.transport().calls_of(Operation::Create), 0);
}

#[test]
fn editing_from_details_sends_partial_update() {
    let mut app = app_with(vec![record("A"), record("B")]);
    let mut script = ScriptedInteraction::new(vec![
        Step::Browse(BrowseAction::View),
        Step::Pick(1),
        Step::Details(DetailsAction::Edit),
        value("Bea"),
        Step::Field(PromptResponse::Keep),
        Step::Field(PromptResponse::Keep),
        Step::Submit(ConfirmationResponse::Confirm),
        Step::Browse(BrowseAction::Quit),
    ]);

    app.run(&mut script);

    assert_eq!(
        script.prompted_fields,
        vec![Field::FirstName, Field::LastName, Field::DateOfBirth]
    );
    let expected = UpdateRequest {
        first_name: Some("Bea".into()),
        ..UpdateRequest::default()
    };
    assert!(app
        .transport()
        .calls()
        .contains(&TransportCall::Update(record("B").id, expected)));
    assert_eq!(app.list().records()[1].first_name, "Bea");
}

#[test]
fn cancelled_form_goes_back_without_saving() {
    let mut app = app_with(vec![record("A")]);
    let mut script = ScriptedInteraction::new(vec![
        Step::Browse(BrowseAction::Edit),
        Step::Pick(0),
        Step::Field(PromptResponse::Cancel),
        Step::Browse(BrowseAction::Quit),
    ]);

    app.run(&mut script);

    assert_eq!(app.transport().calls_of(Operation::Update), 0);
    assert_eq!(app.coordinator().active_mode(), ActiveMode::Browsing);
    assert_eq!(app.transport().calls_of(Operation::List), 2);
}

#[test]
fn delete_requires_confirmation() {
    let mut app = app_with(SIX_USERS.clone());
    let mut script = ScriptedInteraction::new(vec![
        Step::Browse(BrowseAction::Delete),
        Step::Pick(0),
        Step::ConfirmDelete(false),
        Step::Browse(BrowseAction::Delete),
        Step::Pick(0),
        Step::ConfirmDelete(true),
        Step::Browse(BrowseAction::Quit),
    ]);

    app.run(&mut script);

    assert_eq!(app.transport().calls_of(Operation::Delete), 1);
    assert_eq!(ids(app.list().records()), vec!["B", "C", "D", "E", "F"]);
}

#[test]
fn go_to_page_jumps_directly() {
    let mut app = app_with(SIX_USERS.clone());
    let mut script = ScriptedInteraction::new(vec![
        Step::Browse(BrowseAction::GoToPage),
        Step::Page(2),
    ]);

    assert_eq!(app.step(&mut script), Flow::Continue);
    assert_eq!(app.list().current_page(), 2);
}

#[test]
fn details_back_returns_to_browsing() {
    let mut app = app_with(vec![record("A")]);
    let mut script = ScriptedInteraction::new(vec![
        Step::Browse(BrowseAction::View),
        Step::Pick(0),
    ]);

    app.step(&mut script);
    assert_eq!(
        app.coordinator().state(),
        &ViewState::ViewingDetails(record("A"))
    );

    let mut back = ScriptedInteraction::new(vec![Step::Details(DetailsAction::Back)]);
    app.step(&mut back);
    assert_eq!(app.coordinator().state(), &ViewState::Browsing);
}

#[test]
fn saving_refetches_before_the_list_is_shown_again() {
    let mut app = app_with(vec![record("A")]);
    let mut script = ScriptedInteraction::new(vec![
        Step::Browse(BrowseAction::Add),
        value("newbie"),
        value("secret"),
        value("New"),
        value("Bie"),
        value("2001-02-03"),
        Step::Submit(ConfirmationResponse::Confirm),
        Step::Browse(BrowseAction::Quit),
    ]);

    app.step(&mut script);
    assert!(app.list().is_empty());
    app.step(&mut script);

    assert_eq!(app.coordinator().state(), &ViewState::Browsing);
    assert_eq!(app.list().records().len(), 2);
    assert_eq!(app.transport().calls_of(Operation::List), 2);
    assert!(script
        .notifications
        .contains(&Notification::success("User created successfully")));

    assert_eq!(app.step(&mut script), Flow::Quit);
    assert_eq!(app.transport().calls_of(Operation::List), 2);
}

#[test]
fn returning_after_a_failed_fetch_shows_an_empty_first_page() {
    let mut app = app_with(SIX_USERS.clone());
    let mut script = ScriptedInteraction::new(vec![
        Step::Browse(BrowseAction::NextPage),
        Step::Browse(BrowseAction::Add),
        Step::Field(PromptResponse::Cancel),
        Step::Browse(BrowseAction::Quit),
    ]);

    app.step(&mut script);
    app.step(&mut script);
    app.transport()
        .fail_next(Operation::List, ClientError::transport("connection refused"));
    app.step(&mut script);
    assert_eq!(app.step(&mut script), Flow::Quit);

    assert!(app.list().records().is_empty());
    assert_eq!(app.list().current_page(), 1);
    assert_eq!(
        script.offered_actions.last(),
        Some(&vec![BrowseAction::Add, BrowseAction::Refresh, BrowseAction::Quit])
    );
    assert_eq!(
        script.notifications,
        vec![Notification::error("error fetching users")]
    );
}
