// Unit tests for domain models

use super::*;
use chrono::TimeZone;

fn sample_clip() -> Clip {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let new_clip = NewClip {
        video_id: VideoId::generate(),
        folder_id: None,
        title: "Cold open".to_string(),
        range: TimeRange::unchecked(10.0, 40.0),
        aspect_ratio: AspectRatio::Portrait,
        subtitle_enabled: true,
        subtitle_settings: SubtitleSettings {
            font: SubtitleFont::BebasNeue,
            design: SubtitleDesign::Karaoke,
            highlights: vec!["money".to_string()],
        },
        text_overlays: OverlayCollection::new(),
    };
    Clip::from_new(ClipId::generate(), new_clip, now)
}

#[test]
fn test_time_range_new_validates() {
    assert!(TimeRange::new(10.0, 40.0, 120).is_ok());
    assert!(TimeRange::new(40.0, 10.0, 120).is_err());
    assert!(TimeRange::new(10.0, 130.0, 120).is_err());
    assert!(TimeRange::new(10.0, 130.0, 0).is_ok());
}

#[test]
fn test_time_range_duration_and_contains() {
    let range = TimeRange::unchecked(10.0, 40.0);
    assert_eq!(range.duration(), 30.0);
    assert!(range.contains(10.0));
    assert!(range.contains(39.9));
    assert!(!range.contains(40.0));
    assert!(!range.contains(9.99));
}

#[test]
fn test_time_range_display() {
    assert_eq!(TimeRange::unchecked(65.0, 125.4).to_string(), "1:05 - 2:05");
}

#[test]
fn test_aspect_ratio_parse() {
    assert_eq!(AspectRatio::parse("16:9").unwrap(), AspectRatio::Landscape);
    assert_eq!(AspectRatio::parse(" 1:1 ").unwrap(), AspectRatio::Square);
    assert!(matches!(
        AspectRatio::parse("21:9"),
        Err(ValidationError::UnknownTag { .. })
    ));
}

#[test]
fn test_subtitle_tags_parse_case_insensitive() {
    assert_eq!(SubtitleFont::parse("bebas neue").unwrap(), SubtitleFont::BebasNeue);
    assert_eq!(SubtitleDesign::parse("NEON").unwrap(), SubtitleDesign::Neon);
    assert!(SubtitleFont::parse("Comic Sans").is_err());
    assert_eq!(SourceKind::parse("YouTube").unwrap(), SourceKind::Youtube);
}

#[test]
fn test_record_id_parse_roundtrip_text() {
    let id = FolderId::generate();
    assert_eq!(FolderId::parse(&id.to_string()).unwrap(), id);
    assert!(ClipId::parse("not-a-uuid").is_err());
}

#[test]
fn test_clip_record_shape() {
    let mut clip = sample_clip();
    clip.text_overlays
        .add(crate::domain::overlays::OverlayTemplate::default());

    let value = serde_json::to_value(&clip).unwrap();
    let object = value.as_object().unwrap();
    for key in [
        "id",
        "video_id",
        "folder_id",
        "title",
        "start_time",
        "end_time",
        "aspect_ratio",
        "subtitle_enabled",
        "subtitle_settings",
        "text_overlays",
        "created_at",
        "updated_at",
    ] {
        assert!(object.contains_key(key), "missing field {}", key);
    }
    assert_eq!(object.len(), 12);
    assert!(value["folder_id"].is_null());
    assert_eq!(value["aspect_ratio"], "9:16");
    assert_eq!(value["subtitle_settings"]["font"], "Bebas Neue");
    assert_eq!(value["subtitle_settings"]["design"], "karaoke");
    assert_eq!(value["subtitle_settings"]["highlights"][0], "money");
    assert_eq!(value["text_overlays"][0]["fontSize"], 32);

    let back: Clip = serde_json::from_value(value).unwrap();
    assert_eq!(back, clip);
}

#[test]
fn test_clip_status() {
    let mut clip = sample_clip();
    assert_eq!(clip.status(), ClipStatus::Unassigned);

    let folder = FolderId::generate();
    clip.folder_id = Some(folder);
    assert_eq!(clip.status(), ClipStatus::Assigned(folder));
}

#[test]
fn test_patch_applies_present_fields_only() {
    let mut clip = sample_clip();
    let original_settings = clip.subtitle_settings.clone();

    let patch = ClipPatch::default()
        .with_title("  Hook  ")
        .with_subtitles(false)
        .with_aspect_ratio(AspectRatio::Square);
    patch.apply_to(&mut clip);

    assert_eq!(clip.title, "Hook");
    assert!(!clip.subtitle_enabled);
    assert_eq!(clip.aspect_ratio, AspectRatio::Square);
    // disabling keeps the styling for later
    assert_eq!(clip.subtitle_settings, original_settings);
    assert_eq!(clip.range, TimeRange::unchecked(10.0, 40.0));
}

#[test]
fn test_patch_folder_set_and_clear() {
    let mut clip = sample_clip();
    let folder = FolderId::generate();

    ClipPatch::move_to(Some(folder)).apply_to(&mut clip);
    assert_eq!(clip.folder_id, Some(folder));

    ClipPatch::default().with_title("x").apply_to(&mut clip);
    assert_eq!(clip.folder_id, Some(folder));

    ClipPatch::move_to(None).apply_to(&mut clip);
    assert_eq!(clip.folder_id, None);
}

#[test]
fn test_patch_is_empty() {
    assert!(ClipPatch::default().is_empty());
    assert!(!ClipPatch::move_to(None).is_empty());
}

#[test]
fn test_batch_outcome_bookkeeping() {
    let ok = ClipId::generate();
    let bad = ClipId::generate();

    let mut outcome = BatchOutcome::new();
    outcome.record_success(ok);
    assert!(outcome.is_complete());

    let mut other = BatchOutcome::new();
    other.record_failure(bad, FailureReason::ClipNotFound);
    outcome.merge(other);

    assert!(!outcome.is_complete());
    assert_eq!(outcome.failed_ids(), vec![bad]);
    assert_eq!(outcome.reason_for(bad), Some(&FailureReason::ClipNotFound));
    assert_eq!(outcome.reason_for(ok), None);
}
