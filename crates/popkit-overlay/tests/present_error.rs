use std::time::Duration;

use popkit_core::color::Rgba;
use popkit_overlay::controller::{ERROR_ICON, ERROR_IMAGE};
use popkit_overlay::{ButtonRole, ContentBlock, LifecycleState, OverlayController, Transition};

#[derive(Debug, thiserror::Error)]
#[error("Upload failed")]
struct UploadError {
    #[source]
    cause: std::io::Error,
}

#[derive(Debug, thiserror::Error)]
#[error("Session expired")]
struct SessionExpired;

#[test]
fn error_alert_shows_description_and_reason() {
    let err = UploadError {
        cause: std::io::Error::other("network unreachable"),
    };
    let mut c = OverlayController::new();
    assert_eq!(c.present_error(&err), Transition::Started);
    assert_eq!(c.state(), LifecycleState::Presenting);
    assert_eq!(c.tint(), Rgba::RED);

    let content = c.content();
    assert_eq!(content.title, "Attention");
    assert_eq!(content.title_icon.as_deref(), Some(ERROR_ICON));
    let text = content.visible_text();
    assert!(text.contains("Upload failed"), "{text}");
    assert!(text.contains("network unreachable"), "{text}");
    assert_eq!(content.dismiss_button_count(), 1);
    assert!(content.blocks().any(
        |b| matches!(b, ContentBlock::Image { name, .. } if name.as_str() == ERROR_IMAGE)
    ));
}

#[test]
fn error_without_source_has_only_description() {
    let mut c = OverlayController::new();
    c.present_error(&SessionExpired);
    assert_eq!(c.content().visible_text(), "Session expired");
}

#[test]
fn error_dismiss_button_closes_the_alert() {
    let mut c = OverlayController::new();
    c.present_error(&SessionExpired);
    c.tick(Duration::from_millis(400));
    let id = c
        .content()
        .blocks()
        .find_map(|b| match b {
            ContentBlock::Button { id, role, .. } if *role == ButtonRole::Dismiss => Some(*id),
            _ => None,
        })
        .expect("dismiss button");
    assert!(c.press_button(id));
    c.tick(Duration::from_millis(300));
    assert_eq!(c.state(), LifecycleState::Hidden);
}

#[test]
fn error_replaces_previous_content() {
    let mut c = OverlayController::new();
    c.add_text("stale");
    c.add_dismiss_button();
    c.present_error(&SessionExpired);
    assert!(!c.content().visible_text().contains("stale"));
    assert_eq!(c.content().dismiss_button_count(), 1);
}

#[test]
fn error_while_visible_is_ignored() {
    let mut c = OverlayController::new();
    c.add_text("first");
    c.present(None);
    assert_eq!(c.present_error(&SessionExpired), Transition::Ignored);
    assert_eq!(c.content().visible_text(), "first");
    assert_ne!(c.tint(), Rgba::RED);
}
