use super::*;
use crate::store::MemoryStore;
use crate::surface::MemorySurface;

fn start_with(
    server: Option<&str>,
    stored: Option<&str>,
    buttons: &[Option<&str>],
) -> (ThemeController, MemoryStore, MemorySurface) {
    let mut store = match stored {
        Some(value) => MemoryStore::with_values(&[("theme", value)]),
        None => MemoryStore::new(),
    };
    let mut surface = MemorySurface::new();
    let buttons = buttons.iter().map(|b| b.map(str::to_owned)).collect();
    let controller =
        ThemeController::start(server, true, buttons, &ChromeConfig::default(), &mut store, &mut surface);
    (controller, store, surface)
}

// =============================================================
// Theme
// =============================================================

#[test]
fn theme_default_is_dark() {
    assert_eq!(Theme::default(), Theme::Dark);
}

#[test]
fn theme_parses_exact_values_only() {
    assert_eq!("light".parse::<Theme>(), Ok(Theme::Light));
    assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
    assert!("Dark".parse::<Theme>().is_err());
    assert!(" dark".parse::<Theme>().is_err());
    assert!("".parse::<Theme>().is_err());
}

#[test]
fn theme_coerce_invalid_and_absent_to_fallback() {
    assert_eq!(Theme::coerce(None, Theme::Dark), Theme::Dark);
    assert_eq!(Theme::coerce(Some("sepia"), Theme::Dark), Theme::Dark);
    assert_eq!(Theme::coerce(Some("light"), Theme::Dark), Theme::Light);
    assert_eq!(Theme::coerce(Some("bogus"), Theme::Light), Theme::Light);
}

#[test]
fn theme_from_switch() {
    assert_eq!(Theme::from_switch(true), Theme::Dark);
    assert_eq!(Theme::from_switch(false), Theme::Light);
}

#[test]
fn theme_display_matches_wire_value() {
    assert_eq!(Theme::Light.to_string(), "light");
    assert_eq!(Theme::Dark.to_string(), "dark");
}

#[test]
fn theme_serde_lowercase() {
    assert_eq!(serde_json::to_string(&Theme::Light).expect("serialize"), "\"light\"");
    assert_eq!(serde_json::from_str::<Theme>("\"dark\"").expect("deserialize"), Theme::Dark);
}

// =============================================================
// resolve_initial
// =============================================================

#[test]
fn valid_server_value_wins_and_writes_back_when_different() {
    let r = resolve_initial(Some("light"), Some("dark"), Theme::Dark);
    assert_eq!(r, ThemeResolution { theme: Theme::Light, write_back: true });
}

#[test]
fn valid_server_value_matching_storage_skips_write_back() {
    let r = resolve_initial(Some("dark"), Some("dark"), Theme::Dark);
    assert_eq!(r, ThemeResolution { theme: Theme::Dark, write_back: false });
}

#[test]
fn valid_server_value_with_empty_storage_writes_back() {
    let r = resolve_initial(Some("dark"), None, Theme::Dark);
    assert!(r.write_back);
}

#[test]
fn invalid_server_value_falls_back_to_storage() {
    let r = resolve_initial(Some("purple"), Some("light"), Theme::Dark);
    assert_eq!(r, ThemeResolution { theme: Theme::Light, write_back: false });
}

#[test]
fn everything_invalid_or_absent_yields_default() {
    for (server, stored) in [(None, None), (Some("x"), None), (None, Some("y")), (Some(""), Some("LIGHT"))] {
        let r = resolve_initial(server, stored, Theme::Dark);
        assert_eq!(r.theme, Theme::Dark, "server={server:?} stored={stored:?}");
        assert!(!r.write_back);
    }
}

// =============================================================
// button_patch
// =============================================================

#[test]
fn matching_button_is_selected() {
    let patch = button_patch(Some("dark"), Theme::Dark);
    assert_eq!(patch.state_of(ACTIVE_CLASS), Some(true));
    assert_eq!(patch.state_of(SELECTED_BUTTON_CLASS), Some(true));
    assert_eq!(patch.state_of(UNSELECTED_BUTTON_CLASS), Some(false));
}

#[test]
fn other_and_valueless_buttons_are_unselected() {
    for value in [Some("light"), Some("Dark"), None] {
        let patch = button_patch(value, Theme::Dark);
        assert_eq!(patch.state_of(ACTIVE_CLASS), Some(false));
        assert_eq!(patch.state_of(SELECTED_BUTTON_CLASS), Some(false));
        assert_eq!(patch.state_of(UNSELECTED_BUTTON_CLASS), Some(true));
    }
}

// =============================================================
// ThemeController
// =============================================================

#[test]
fn start_without_any_source_applies_dark() {
    let (controller, store, surface) = start_with(None, None, &[]);
    assert_eq!(controller.theme(), Theme::Dark);
    assert_eq!(surface.theme(), Some(Theme::Dark));
    assert_eq!(surface.toggle_checked(), Some(true));
    assert!(store.is_empty());
}

#[test]
fn start_with_server_theme_persists_it() {
    let (controller, store, surface) = start_with(Some("light"), Some("dark"), &[]);
    assert_eq!(controller.theme(), Theme::Light);
    assert_eq!(surface.theme(), Some(Theme::Light));
    assert_eq!(surface.toggle_checked(), Some(false));
    assert_eq!(store.get("theme").as_deref(), Some("light"));
}

#[test]
fn start_with_stored_theme_only() {
    let (controller, _store, _surface) = start_with(None, Some("light"), &[]);
    assert_eq!(controller.theme(), Theme::Light);
}

#[test]
fn start_styles_buttons_by_value() {
    let (_controller, _store, surface) = start_with(Some("light"), None, &[Some("light"), Some("dark"), None]);
    assert!(surface.has_class(Target::ThemeButton(0), ACTIVE_CLASS));
    assert!(surface.has_class(Target::ThemeButton(0), SELECTED_BUTTON_CLASS));
    assert!(!surface.has_class(Target::ThemeButton(1), ACTIVE_CLASS));
    assert!(surface.has_class(Target::ThemeButton(1), UNSELECTED_BUTTON_CLASS));
    assert!(surface.has_class(Target::ThemeButton(2), UNSELECTED_BUTTON_CLASS));
}

#[test]
fn start_without_switch_leaves_switch_untouched() {
    let mut store = MemoryStore::new();
    let mut surface = MemorySurface::new();
    ThemeController::start(None, false, Vec::new(), &ChromeConfig::default(), &mut store, &mut surface);
    assert_eq!(surface.toggle_checked(), None);
    assert_eq!(surface.theme(), Some(Theme::Dark));
}

#[test]
fn switch_change_applies_and_persists() {
    let (mut controller, mut store, mut surface) = start_with(None, None, &[Some("light"), Some("dark")]);
    let theme = controller.on_switch_changed(false, &mut store, &mut surface);
    assert_eq!(theme, Theme::Light);
    assert_eq!(surface.theme(), Some(Theme::Light));
    assert_eq!(surface.toggle_checked(), Some(false));
    assert_eq!(store.get("theme").as_deref(), Some("light"));
    assert!(surface.has_class(Target::ThemeButton(0), ACTIVE_CLASS));
    assert!(!surface.has_class(Target::ThemeButton(1), ACTIVE_CLASS));

    controller.on_switch_changed(true, &mut store, &mut surface);
    assert_eq!(store.get("theme").as_deref(), Some("dark"));
    assert!(surface.has_class(Target::ThemeButton(1), ACTIVE_CLASS));
}

#[test]
fn apply_coerces_invalid_request() {
    let (mut controller, store, mut surface) = start_with(Some("light"), None, &[]);
    assert_eq!(controller.apply(Some("neon"), &mut surface), Theme::Dark);
    assert_eq!(surface.theme(), Some(Theme::Dark));
    assert_eq!(controller.apply(None, &mut surface), Theme::Dark);
    assert_eq!(controller.apply(Some("light"), &mut surface), Theme::Light);
    // apply alone never persists
    assert_eq!(store.get("theme").as_deref(), Some("light"));
}

#[test]
fn configured_default_theme_is_used() {
    let config = ChromeConfig { default_theme: Theme::Light, ..ChromeConfig::default() };
    let mut store = MemoryStore::with_values(&[("theme", "garbage")]);
    let mut surface = MemorySurface::new();
    let controller = ThemeController::start(None, true, Vec::new(), &config, &mut store, &mut surface);
    assert_eq!(controller.theme(), Theme::Light);
}
