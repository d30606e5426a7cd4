//! Integration tests for the playlist registry
//!
//! Covers membership editing, dynamic playlists following the pool, naming,
//! lifecycle events and navigation restore.


use cadence_core::TrackRef;
use cadence_playlists::{
    CreatePlaylist, Playlist, PlaylistEvent, PlaylistRegistry, PlaylistType, RegistrySettings,
    ParserSet,
};
use test_helpers::*;

// ===== Membership =====

#[test]
fn test_add_tracks_in_order_with_source() {
    let mut registry = setup_registry();
    registry.create("Foo");

    let tracks = numbered_tracks(3);
    let change = registry.add_to_playlist(&tracks, "Foo", None);

    let foo = registry.get("Foo").unwrap();
    assert_eq!(change.added.len(), 3);
    assert_eq!(paths(foo.tracks()), vec!["file1.mp3", "file2.mp3", "file3.mp3"]);
    assert!(foo
        .tracks()
        .iter()
        .all(|t| t.source.as_deref() == Some("Playlist:Foo")));
}

#[test]
fn test_readding_existing_track_moves_it_to_the_tail() {
    let mut registry = setup_registry();
    registry.create("Foo");
    registry.add_to_playlist(&numbered_tracks(3), "Foo", None);

    let batch = vec![TrackRef::new("file4.mp3"), TrackRef::new("file1.mp3")];
    let change = registry.add_to_playlist(&batch, "Foo", None);

    assert_eq!(change.added, vec!["file4.mp3"]);
    assert_eq!(change.moved, vec!["file1.mp3"]);
    assert_eq!(
        paths(registry.get("Foo").unwrap().tracks()),
        vec!["file2.mp3", "file3.mp3", "file4.mp3", "file1.mp3"]
    );
}

#[test]
fn test_remove_skips_tracks_that_are_not_members() {
    let mut registry = setup_registry();
    registry.create("Foo");
    registry.add_to_playlist(&numbered_tracks(2), "Foo", None);

    let change = registry.remove_from_playlist(
        &[TrackRef::new("file1.mp3"), TrackRef::new("nope.mp3")],
        "Foo",
    );

    assert_eq!(change.removed, vec!["file1.mp3"]);
    assert_eq!(paths(registry.get("Foo").unwrap().tracks()), vec!["file2.mp3"]);
}

#[test]
fn test_tracks_changed_carries_time() {
    let mut registry = setup_registry();
    registry.create("Foo");
    registry.drain_events();

    registry.add_to_playlist(
        &[
            create_track("a.mp3", "A", "One", 100.0),
            create_track("b.mp3", "B", "Two", 50.5),
        ],
        "Foo",
        None,
    );

    let events = registry.drain_events();
    assert_eq!(events.len(), 1);
    match &events[0] {
        PlaylistEvent::TracksChanged { name, change, time } => {
            assert_eq!(name, "Foo");
            assert_eq!(change.added.len(), 2);
            assert_eq!(*time, 150.5);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn test_no_event_when_nothing_changes() {
    let mut registry = setup_registry();
    registry.create("Foo");
    registry.drain_events();

    registry.remove_from_playlist(&[TrackRef::new("x.mp3")], "Foo");
    registry.add_to_playlist(&numbered_tracks(1), "Missing", None);

    assert!(!registry.has_pending_events());
}

#[test]
fn test_has_lists_every_playlist_with_the_track() {
    let mut registry = setup_registry();
    registry.create("A");
    registry.create("B");
    registry.create("C");
    let track = TrackRef::new("shared.mp3");
    registry.add_to_playlist(&[track.clone()], "A", None);
    registry.add_to_playlist(&[track.clone()], "C", None);

    let names: Vec<_> = registry.has(&track).iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["A", "C"]);
    assert!(registry.contains("A", &track));
    assert!(!registry.contains("B", &track));
}

#[test]
fn test_contains_all_on_empty_playlist_is_false() {
    let mut registry = setup_registry();
    registry.create("Empty");

    assert!(!registry.contains_all("Empty", &[]));
    assert!(!registry.contains_any("Empty", &numbered_tracks(1)));
}

// ===== Dynamic playlists =====

fn pool_tracks() -> Vec<TrackRef> {
    vec![
        TrackRef::new("t1.mp3").with_title("Foobar"),
        TrackRef::new("t2.mp3").with_title("Bar"),
        TrackRef::new("t3.mp3").with_title("Something"),
    ]
}

#[test]
fn test_refresh_follows_filter_changes() {
    let mut registry = setup_registry();
    registry.replace_pool(pool_tracks());
    registry.create("Dyn");

    registry.set_filter("Dyn", Some("foo"));
    let titles: Vec<_> = registry
        .get("Dyn")
        .unwrap()
        .tracks()
        .iter()
        .map(|t| t.title.clone())
        .collect();
    assert_eq!(titles, vec!["Foobar"]);

    let change = registry.set_filter("Dyn", Some("some"));
    assert_eq!(change.removed, vec!["t1.mp3"]);
    assert_eq!(change.added, vec!["t3.mp3"]);
    let titles: Vec<_> = registry
        .get("Dyn")
        .unwrap()
        .tracks()
        .iter()
        .map(|t| t.title.clone())
        .collect();
    assert_eq!(titles, vec!["Something"]);
}

#[test]
fn test_create_dynamic_fills_from_pool_then_announces() {
    let mut registry = setup_registry();
    registry.replace_pool(pool_tracks());

    let playlist = registry.create_dynamic("Bars", "bar");
    assert_eq!(playlist.playlist_type(), PlaylistType::Dynamic);
    assert_eq!(paths(playlist.tracks()), vec!["t1.mp3", "t2.mp3"]);

    let events = registry.drain_events();
    assert!(matches!(events[0], PlaylistEvent::TracksChanged { .. }));
    assert!(matches!(
        &events[1],
        PlaylistEvent::Created { name, interactive: true } if name == "Bars"
    ));
}

#[test]
fn test_pool_growth_refreshes_with_only_the_new_tracks() {
    let mut registry = setup_registry();
    registry.replace_pool(pool_tracks());
    registry.create_dynamic("Bars", "bar");

    // Manually dropped; only a full refresh would bring it back
    registry.remove_from_playlist(&[TrackRef::new("t2.mp3")], "Bars");
    registry.drain_events();

    let added = registry.extend_pool(vec![
        TrackRef::new("t4.mp3").with_title("Crowbar"),
        TrackRef::new("t5.mp3").with_title("Jazz"),
        TrackRef::new("t1.mp3").with_title("Foobar"),
    ]);
    assert_eq!(added, 2);
    assert_eq!(paths(registry.get("Bars").unwrap().tracks()), vec!["t1.mp3", "t4.mp3"]);

    let events = registry.drain_events();
    assert!(matches!(
        events.as_slice(),
        [PlaylistEvent::TracksChanged { name, change, .. }]
            if name == "Bars" && change.added == vec!["t4.mp3".to_string()]
    ));

    // A pool replacement is a full refresh: it brings it back in pool order
    let mut everything = pool_tracks();
    everything.push(TrackRef::new("t4.mp3").with_title("Crowbar"));
    registry.replace_pool(everything);
    assert_eq!(
        paths(registry.get("Bars").unwrap().tracks()),
        vec!["t1.mp3", "t2.mp3", "t4.mp3"]
    );
}

#[test]
fn test_pool_replacement_fully_refreshes_dynamic_playlists() {
    let mut registry = setup_registry();
    registry.replace_pool(pool_tracks());
    registry.create_dynamic("Bars", "bar");
    registry.create("Manual");
    registry.add_to_playlist(&[TrackRef::new("t2.mp3")], "Manual", None);

    registry.replace_pool(vec![TrackRef::new("t9.mp3").with_title("Barbershop")]);

    assert_eq!(paths(registry.get("Bars").unwrap().tracks()), vec!["t9.mp3"]);
    assert_eq!(paths(registry.get("Manual").unwrap().tracks()), vec!["t2.mp3"]);
}

#[test]
fn test_pool_removal_drops_tracks_from_dynamic_playlists_only() {
    let mut registry = setup_registry();
    registry.replace_pool(pool_tracks());
    registry.create_dynamic("Bars", "bar");
    registry.create("Manual");
    registry.add_to_playlist(&[TrackRef::new("t2.mp3")], "Manual", None);

    assert_eq!(registry.remove_from_pool(&[TrackRef::new("t2.mp3")]), 1);

    assert_eq!(paths(registry.get("Bars").unwrap().tracks()), vec!["t1.mp3"]);
    assert_eq!(paths(registry.get("Manual").unwrap().tracks()), vec!["t2.mp3"]);
}

#[test]
fn test_clearing_filter_keeps_members() {
    let mut registry = setup_registry();
    registry.replace_pool(pool_tracks());
    registry.create_dynamic("Bars", "bar");

    let change = registry.set_filter("Bars", Some(" "));
    assert!(change.is_empty());

    let bars = registry.get("Bars").unwrap();
    assert_eq!(bars.playlist_type(), PlaylistType::Standard);
    assert_eq!(bars.len(), 2);
}

// ===== Naming and lifecycle =====

#[test]
fn test_create_resolves_name_collisions() {
    let mut registry = setup_registry();
    registry.create("Foo");

    assert_eq!(registry.create("Foo").name(), "Foo 1");
    assert_eq!(registry.create("Foo").name(), "Foo 2");
    assert_eq!(registry.create("").name(), "Playlist");
    assert_eq!(registry.len(), 4);
}

#[test]
fn test_rename_to_blank_is_rejected() {
    let mut registry = setup_registry();
    registry.create("Foo");
    registry.drain_events();

    assert!(!registry.rename("Foo", ""));
    assert!(!registry.rename("Foo", "   "));
    assert!(registry.get("Foo").is_some());
    assert!(!registry.has_pending_events());
}

#[test]
fn test_rename_to_taken_name_gets_suffix() {
    let mut registry = setup_registry();
    registry.create("Foo");
    registry.create("Bar");
    registry.drain_events();

    assert!(registry.rename("Bar", "Foo"));
    assert!(registry.get("Foo 1").is_some());
    assert_eq!(
        registry.drain_events(),
        vec![PlaylistEvent::Renamed {
            old_name: "Bar".into(),
            new_name: "Foo 1".into(),
        }]
    );
}

#[test]
fn test_rename_changes_source_tag_for_later_adds() {
    let mut registry = setup_registry();
    registry.create("Old");
    registry.rename("Old", "New");
    registry.add_to_playlist(&numbered_tracks(1), "New", None);

    let track = &registry.get("New").unwrap().tracks()[0];
    assert_eq!(track.source.as_deref(), Some("Playlist:New"));
}

#[test]
fn test_remove_announces_before_unlinking() {
    let mut registry = setup_registry();
    registry.create(CreatePlaylist::new("Cloud").id(7));
    registry.drain_events();

    let removed = registry.remove(7u32).unwrap();
    assert_eq!(removed.name(), "Cloud");
    assert!(registry.is_empty());
    assert_eq!(
        registry.drain_events(),
        vec![PlaylistEvent::Removed {
            name: "Cloud".into()
        }]
    );
    assert!(registry.remove("Cloud").is_none());
}

#[test]
fn test_silent_create_queues_nothing() {
    let mut registry = setup_registry();
    registry.create(CreatePlaylist::new("Quiet").silent());
    assert!(!registry.has_pending_events());

    registry.create(CreatePlaylist::new("Loud").interactive());
    assert_eq!(
        registry.drain_events(),
        vec![PlaylistEvent::Created {
            name: "Loud".into(),
            interactive: true,
        }]
    );
}

#[test]
fn test_create_owned_uses_current_user() {
    let settings = RegistrySettings {
        current_user_id: Some(11),
        ..RegistrySettings::default()
    };
    let mut registry = PlaylistRegistry::new(settings, ParserSet::new());

    let playlist = registry.create_owned("Mine", true);
    assert_eq!(playlist.owner_id(), 11);
    assert!(!playlist.is_foreign());
}

#[test]
fn test_foreign_playlist_is_read_only() {
    let settings = RegistrySettings {
        current_user_id: Some(1),
        ..RegistrySettings::default()
    };
    let mut registry = PlaylistRegistry::new(settings, ParserSet::new());
    registry.create(CreatePlaylist::new("Theirs").owner(2));

    let change = registry.add_to_playlist(&numbered_tracks(2), "Theirs", None);
    assert!(change.is_empty());
    assert!(registry.get("Theirs").unwrap().is_empty());
}

// ===== Initialize and navigation =====

fn persisted() -> Vec<Playlist> {
    let mut mix = Playlist::with_tracks("Mix", numbered_tracks(2));
    mix.set_id(3);
    vec![mix, Playlist::new("Empty")]
}

#[test]
fn test_initialize_restores_current_playlist() {
    let settings = RegistrySettings {
        active_navigation: "Playlist:Mix:3".into(),
        selected_navigation: "Playlist:Empty:0".into(),
        ..RegistrySettings::default()
    };
    let mut registry = PlaylistRegistry::new(settings, ParserSet::new());
    registry.initialize(persisted());

    assert_eq!(registry.current_playlist().unwrap().name(), "Mix");
    assert_eq!(registry.get_selected().unwrap().name(), "Empty");

    let created = registry
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, PlaylistEvent::Created { interactive: false, .. }))
        .count();
    assert_eq!(created, 2);
}

#[test]
fn test_initialize_falls_back_when_playlist_is_gone() {
    let settings = RegistrySettings {
        active_navigation: "Playlist:Gone:0".into(),
        selected_navigation: "Playlist:Gone:0".into(),
        ..RegistrySettings::default()
    };
    let mut registry = PlaylistRegistry::new(settings, ParserSet::new());
    registry.initialize(persisted());

    assert!(registry.current_playlist().is_none());
    assert_eq!(registry.settings().active_navigation, "Files");
    assert_eq!(registry.settings().selected_navigation, "Files");
}

#[test]
fn test_removing_current_playlist_clears_it() {
    let settings = RegistrySettings {
        active_navigation: "Playlist:Mix:3".into(),
        ..RegistrySettings::default()
    };
    let mut registry = PlaylistRegistry::new(settings, ParserSet::new());
    registry.initialize(persisted());

    registry.rename("Mix", "Renamed");
    assert_eq!(registry.current_playlist().unwrap().name(), "Renamed");

    registry.remove("Renamed");
    assert!(registry.current_playlist().is_none());
}

#[test]
fn test_into_playlists_round_trips_through_json() {
    let mut registry = setup_registry();
    registry.create_dynamic("Dyn", "rock");
    registry.create("Plain");
    registry.add_to_playlist(&numbered_tracks(2), "Plain", None);

    let json = serde_json::to_string(&registry.into_playlists()).unwrap();
    let restored: Vec<Playlist> = serde_json::from_str(&json).unwrap();

    let mut registry = setup_registry();
    registry.initialize(restored);
    assert_eq!(registry.get("Dyn").unwrap().filter(), Some("rock"));
    assert_eq!(registry.get("Plain").unwrap().time(), 2.0);
}
