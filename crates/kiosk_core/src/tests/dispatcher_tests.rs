use std::time::Duration;

use super::*;
use crate::ui::HeadlessUi;
use shared::domain::{ControlKind, PromptCategory};

fn dispatcher() -> CommandDispatcher {
    let (scheduler, _ticks) = PromptScheduler::new(Duration::from_secs(5));
    CommandDispatcher::new(vec!["default".into(), "display".into()], scheduler)
}

fn running(dispatcher: &CommandDispatcher) -> Vec<PromptCategory> {
    dispatcher.scheduler().registry().running()
}

#[tokio::test]
async fn display_text_sets_node_without_touching_timers() {
    let mut dispatcher = dispatcher();
    let mut ui = HeadlessUi::new();

    dispatcher.handle_message("display_text_default_Hello", &mut ui);

    assert_eq!(ui.text("text_default"), Some("Hello"));
    assert!(running(&dispatcher).is_empty());
}

#[tokio::test]
async fn welcome_image_on_primary_surface_starts_welcoming_only() {
    let mut dispatcher = dispatcher();
    let mut ui = HeadlessUi::new();

    dispatcher.handle_message("display_image_default_img/registration.png", &mut ui);
    assert_eq!(
        running(&dispatcher),
        vec![PromptCategory::UnknownUser, PromptCategory::Vocal]
    );

    dispatcher.handle_message("display_image_display_default_images/welcome.png", &mut ui);
    assert_eq!(
        ui.image_source("image_display"),
        Some("default_images/welcome.png")
    );
    assert_eq!(running(&dispatcher), vec![PromptCategory::Welcoming]);
    assert_eq!(dispatcher.scheduler().context(), ScreenContext::Welcome);
}

#[tokio::test]
async fn consecutive_welcome_images_keep_one_handle() {
    let mut dispatcher = dispatcher();
    let mut ui = HeadlessUi::new();

    dispatcher.handle_message("display_image_default_img/welcome.png", &mut ui);
    let generation = dispatcher
        .scheduler()
        .registry()
        .generation(PromptCategory::Welcoming);
    dispatcher.handle_message("display_image_default_img/welcome.png", &mut ui);

    assert!(generation.is_some());
    assert_eq!(
        dispatcher
            .scheduler()
            .registry()
            .generation(PromptCategory::Welcoming),
        generation
    );
}

#[tokio::test]
async fn images_on_other_surfaces_leave_scheduler_alone() {
    let mut dispatcher = dispatcher();
    let mut ui = HeadlessUi::new();

    dispatcher.handle_message("display_image_side_img/welcome.png", &mut ui);

    assert_eq!(ui.image_source("image_side"), Some("img/welcome.png"));
    assert!(running(&dispatcher).is_empty());
}

#[tokio::test]
async fn unknown_image_stops_all_prompts() {
    let mut dispatcher = dispatcher();
    let mut ui = HeadlessUi::new();

    dispatcher.handle_message("display_image_default_img/language.png", &mut ui);
    dispatcher.handle_message("display_image_default_img/map_of_rooms.png", &mut ui);

    assert!(running(&dispatcher).is_empty());
}

#[tokio::test]
async fn remove_then_add_leaves_only_new_buttons_in_order() {
    let mut dispatcher = dispatcher();
    let mut ui = HeadlessUi::new();

    dispatcher.handle_message("display_button_old$Old", &mut ui);
    dispatcher.handle_message("remove_buttons", &mut ui);
    dispatcher.handle_message("display_button_yes$Yes", &mut ui);
    dispatcher.handle_message("display_button_start$img/foo.png", &mut ui);

    let controls = ui.controls();
    assert_eq!(controls.len(), 2);
    assert_eq!(controls[0].id().as_str(), "yes");
    assert_eq!(controls[0].label(), Some("Yes"));
    assert_eq!(controls[1].id().as_str(), "start");
    assert_eq!(controls[1].kind(), ControlKind::Image);
    assert_eq!(controls[1].image_source(), Some("img/foo.png"));
}

#[tokio::test]
async fn url_navigates_to_reassembled_address() {
    let mut dispatcher = dispatcher();
    let mut ui = HeadlessUi::new();

    dispatcher.handle_message("url_http://host/a_b", &mut ui);

    assert_eq!(ui.location(), Some("http://host/a_b"));
}

#[tokio::test]
async fn malformed_messages_are_ignored_without_side_effects() {
    let mut dispatcher = dispatcher();
    let mut ui = HeadlessUi::new();
    dispatcher.handle_message("display_image_default_img/welcome.png", &mut ui);
    dispatcher.handle_message("display_text_default_Hi", &mut ui);

    for raw in [
        "display_text_onlyid",
        "display_image_default",
        "display_button",
        "display_button_nodollar",
        "display",
        "remove_everything",
        "url",
        "wave_hands",
        "",
    ] {
        assert!(dispatcher.dispatch(raw, &mut ui).is_err(), "{raw} should fail");
        dispatcher.handle_message(raw, &mut ui);
    }

    assert_eq!(ui.text("text_default"), Some("Hi"));
    assert!(ui.controls().is_empty());
    assert_eq!(ui.location(), None);
    assert_eq!(running(&dispatcher), vec![PromptCategory::Welcoming]);
}

#[tokio::test]
async fn dispatch_reports_error_kind() {
    let mut dispatcher = dispatcher();
    let mut ui = HeadlessUi::new();

    assert!(matches!(
        dispatcher.dispatch("display_text_onlyid", &mut ui),
        Err(CommandError::Malformed { .. })
    ));
    assert!(matches!(
        dispatcher.dispatch("jump", &mut ui),
        Err(CommandError::UnknownVerb(_))
    ));
    assert!(matches!(
        dispatcher.dispatch("display_sound_x_y", &mut ui),
        Err(CommandError::UnknownSubtype { .. })
    ));
}
