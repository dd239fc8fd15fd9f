//! Integration tests for core emote types.

use emodl_core::{Emote, Image, ProviderKind, UserScope, human_size, EstimateSize};

#[test]
fn test_emote_serialization_roundtrip() {
    let emote = Emote::new(
        "60ae958e229664e8667aea38",
        "catJAM",
        vec![Image::new("60ae958e229664e8667aea38", "https://cdn.betterttv.net/emote/60ae958e229664e8667aea38/1x.webp", 28, 28)],
    );
    let json = serde_json::to_string(&emote).unwrap();
    let parsed: Emote = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, emote);
}

#[test]
fn test_scope_roundtrips_through_config_json() {
    let scope = UserScope::platform("twitch", "39226538");
    let json = serde_json::to_string(&scope).unwrap();
    assert!(json.contains(r#""type":"platform""#));
    let parsed: UserScope = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, scope);
}

#[test]
fn test_provider_kinds_are_ordered() {
    let mut kinds = vec![ProviderKind::SevenTv, ProviderKind::Bttv, ProviderKind::Ffz];
    kinds.sort();
    assert_eq!(kinds, ProviderKind::all());
}

#[test]
fn test_size_report_for_emote() {
    let emote = Emote::new("1", "Kappa", Vec::new());
    assert!(human_size(emote.estimated_size()).ends_with(" B"));
}
