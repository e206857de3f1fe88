// Unit tests for business rules

use super::*;
use chrono::{Duration, TimeZone, Utc};
use std::collections::HashSet;

fn video(duration: u64) -> Video {
    Video {
        id: VideoId::generate(),
        title: "Podcast ep. 12".to_string(),
        source_type: SourceKind::Upload,
        source_url: "uploads/ep12.mp4".to_string(),
        duration,
        created_at: Utc::now(),
    }
}

fn folder(name: &str, minutes_ago: i64) -> Folder {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    Folder {
        id: FolderId::generate(),
        name: name.to_string(),
        created_at: base - Duration::minutes(minutes_ago),
    }
}

fn clip_in(folder_id: Option<FolderId>) -> Clip {
    let new_clip = NewClip {
        video_id: VideoId::generate(),
        folder_id,
        title: "clip".to_string(),
        range: TimeRange::unchecked(0.0, 5.0),
        aspect_ratio: AspectRatio::default(),
        subtitle_enabled: false,
        subtitle_settings: SubtitleSettings::default(),
        text_overlays: Default::default(),
    };
    Clip::from_new(ClipId::generate(), new_clip, Utc::now())
}

#[test]
fn test_range_validate_accepts_iff_bounds_hold() {
    let samples = [-1.0, 0.0, 0.5, 10.0, 59.0, 60.0, 61.0, 120.0];
    for &start in &samples {
        for &end in &samples {
            for duration in [0u64, 60, 120] {
                let expected =
                    0.0 <= start && start < end && (duration == 0 || end <= duration as f64);
                let accepted = RangeRules::validate(start, end, duration).is_ok();
                assert_eq!(
                    accepted, expected,
                    "start={} end={} duration={}",
                    start, end, duration
                );
            }
        }
    }
}

#[test]
fn test_range_validate_reasons() {
    assert_eq!(
        RangeRules::validate(40.0, 10.0, 120),
        Err(RangeError::InvertedRange {
            start: 40.0,
            end: 10.0
        })
    );
    assert_eq!(
        RangeRules::validate(10.0, 10.0, 0),
        Err(RangeError::InvertedRange {
            start: 10.0,
            end: 10.0
        })
    );
    assert!(matches!(
        RangeRules::validate(10.0, 121.0, 120),
        Err(RangeError::OutOfBounds { duration: 120, .. })
    ));
    assert!(matches!(
        RangeRules::validate(-2.0, 5.0, 0),
        Err(RangeError::OutOfBounds { .. })
    ));
    assert!(matches!(
        RangeRules::validate(f64::NAN, 5.0, 0),
        Err(RangeError::OutOfBounds { .. })
    ));
}

#[test]
fn test_range_format() {
    assert_eq!(RangeRules::format(125.0), "2:05");
    assert_eq!(RangeRules::format(59.0), "0:59");
    assert_eq!(RangeRules::format(0.0), "0:00");
}

#[test]
fn test_range_clamp_end() {
    assert_eq!(RangeRules::clamp_end(150.0, 120), 120.0);
    assert_eq!(RangeRules::clamp_end(90.0, 120), 90.0);
    assert_eq!(RangeRules::clamp_end(150.0, 0), 150.0);
}

#[test]
fn test_create_clip_success() {
    let parent = video(120);
    let mut draft = ClipDraft::new("  Intro  ", TimeRange::unchecked(10.0, 40.0));
    draft.subtitle_settings.highlights = vec!["*opaque*".to_string()];

    let new_clip = ClipRules::create_clip(&parent, draft).unwrap();
    assert_eq!(new_clip.video_id, parent.id);
    assert_eq!(new_clip.title, "Intro");
    assert_eq!(new_clip.folder_id, None);
    assert_eq!(new_clip.subtitle_settings.highlights, vec!["*opaque*".to_string()]);
}

#[test]
fn test_create_clip_rejects_blank_title_first() {
    let parent = video(120);
    let draft = ClipDraft::new("   ", TimeRange::unchecked(50.0, 10.0));
    assert_eq!(
        ClipRules::create_clip(&parent, draft),
        Err(ValidationError::MissingTitle)
    );
}

#[test]
fn test_create_clip_rejects_out_of_bounds_range() {
    let parent = video(30);
    let draft = ClipDraft::new("Too long", TimeRange::unchecked(10.0, 40.0));
    assert!(matches!(
        ClipRules::create_clip(&parent, draft),
        Err(ValidationError::InvalidRange(RangeError::OutOfBounds { .. }))
    ));
}

#[test]
fn test_create_clip_unknown_duration_only_checks_order() {
    let parent = video(0);
    let draft = ClipDraft::new("Youtube cut", TimeRange::unchecked(300.0, 900.0));
    assert!(ClipRules::create_clip(&parent, draft).is_ok());
}

#[test]
fn test_validate_patch_skips_range_when_absent() {
    // a folder move never looks at the range
    assert!(ClipRules::validate_patch(&ClipPatch::move_to(None), 1).is_ok());

    let bad_range = ClipPatch::default().with_range(TimeRange::unchecked(0.0, 500.0));
    assert!(ClipRules::validate_patch(&bad_range, 120).is_err());

    let blank = ClipPatch::default().with_title(" ");
    assert_eq!(
        ClipRules::validate_patch(&blank, 120),
        Err(ValidationError::MissingTitle)
    );
}

#[test]
fn test_folder_name_normalization() {
    assert_eq!(FolderRules::normalize_name("  B-roll ").unwrap(), "B-roll");
    assert_eq!(FolderRules::normalize_name(" \t"), Err(ValidationError::EmptyName));
}

#[test]
fn test_folder_sort_newest_first_with_id_tiebreak() {
    let older = folder("older", 30);
    let newer = folder("newer", 1);
    let mut twin_a = folder("twin-a", 10);
    let mut twin_b = folder("twin-b", 10);
    if twin_a.id < twin_b.id {
        std::mem::swap(&mut twin_a, &mut twin_b);
    }
    let mut folders = vec![older.clone(), twin_b.clone(), newer.clone(), twin_a.clone()];

    FolderRules::sort_for_display(&mut folders);

    let names: Vec<&str> = folders.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names[0], "newer");
    assert_eq!(names[1], twin_a.name);
    assert_eq!(names[2], twin_b.name);
    assert_eq!(names[3], "older");
}

#[test]
fn test_partition_groups_and_keeps_order() {
    let intro = folder("Intro Cuts", 5);
    let outro = folder("Outro", 10);
    let folders = vec![intro.clone(), outro.clone()];
    let clips = vec![
        clip_in(Some(intro.id)),
        clip_in(None),
        clip_in(Some(intro.id)),
        clip_in(Some(outro.id)),
    ];

    let view = partition(&clips, &folders);

    let intro_ids: Vec<ClipId> = view.clips_in(intro.id).unwrap().iter().map(|c| c.id).collect();
    assert_eq!(intro_ids, vec![clips[0].id, clips[2].id]);
    assert_eq!(view.clips_in(outro.id).unwrap().len(), 1);
    assert_eq!(view.unorganized.len(), 1);
    assert_eq!(view.unorganized[0].id, clips[1].id);
}

#[test]
fn test_partition_covers_every_clip_exactly_once() {
    let kept = folder("kept", 1);
    let folders = vec![kept.clone(), folder("empty", 2)];
    let clips = vec![
        clip_in(Some(kept.id)),
        clip_in(None),
        // folder no longer part of the set
        clip_in(Some(FolderId::generate())),
        clip_in(Some(kept.id)),
        clip_in(None),
    ];

    let view = partition(&clips, &folders);

    let mut seen = HashSet::new();
    for clip in view
        .unorganized
        .iter()
        .chain(view.by_folder.iter().flat_map(|(_, clips)| clips.iter()))
    {
        assert!(seen.insert(clip.id), "clip {} listed twice", clip.id);
    }
    assert_eq!(seen.len(), clips.len());
    assert_eq!(view.total_clips(), clips.len());
    assert_eq!(view.unorganized.len(), 3);
    assert_eq!(view.by_folder.len(), 2);
    assert!(view.by_folder[1].1.is_empty());
}
