#![cfg(feature = "serde")]

use std::time::Duration;

use popkit_overlay::{AlertAnimations, EntryDirection, OverlayConfig, OverlayStyle};

#[test]
fn config_survives_json() {
    let config = OverlayConfig::new()
        .style(OverlayStyle::Notification)
        .entry_direction(EntryDirection::TopRight)
        .exit_animations(AlertAnimations::FADE | AlertAnimations::ZOOM)
        .animation_duration(Duration::from_millis(450))
        .button_labels("OK", "Annuler");
    let json = serde_json::to_string(&config).expect("serialize");
    let back: OverlayConfig = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, config);
}

#[test]
fn missing_fields_take_defaults() {
    let back: OverlayConfig =
        serde_json::from_str(r#"{ "style": "HalfModal", "margin": 20.0 }"#).expect("deserialize");
    assert_eq!(back.style, OverlayStyle::HalfModal);
    assert_eq!(back.margin, 20.0);
    assert_eq!(back.dismiss_velocity, OverlayConfig::default().dismiss_velocity);
    assert_eq!(back.validate(), Ok(()));
}
