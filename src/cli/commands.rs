//! Command implementations

use anyhow::{anyhow, bail, Context, Result};
use tracing::info;

use crate::app::{AppContainer, DefaultAppContainer, DraftOrganizer};
use crate::cli::args::*;
use crate::cli::Commands;
use crate::config_initialization::Settings;
use crate::domain::model::*;
use crate::domain::overlays::{OverlayCollection, OverlayTemplate};
use crate::domain::rules::RangeRules;
use crate::ports::ConfigPort;
use crate::utils::time::{format_clock, TimeParser};

/// Execute a parsed command against the configured store
pub async fn execute(container: &DefaultAppContainer, settings: &Settings, command: Commands) -> Result<()> {
    let mut organizer = container.draft_organizer();
    organizer.load().await.context("Failed to load drafts")?;

    match command {
        Commands::Video { action } => video(container, &mut organizer, action).await,
        Commands::Folder { action } => folder(&mut organizer, action).await,
        Commands::Clip { action } => clip(&mut organizer, settings, action).await,
        Commands::Tree => {
            print_tree(&organizer);
            Ok(())
        }
        Commands::Config => print_config(container).await,
    }
}

async fn video(container: &DefaultAppContainer, organizer: &mut DraftOrganizer, action: VideoCommand) -> Result<()> {
    match action {
        VideoCommand::Add(args) => {
            let source_type = SourceKind::parse(&args.kind)?;
            let video = container
                .store()
                .insert_video(NewVideo {
                    title: args.title,
                    source_type,
                    source_url: args.url,
                    duration: args.duration,
                })
                .await?;
            info!(video_id = %video.id, "Registered video");
            println!("{}", video.id);
        }
        VideoCommand::List => {
            for video in organizer.videos() {
                let duration = if video.has_known_duration() {
                    format_clock(video.duration as f64)
                } else {
                    "?".to_string()
                };
                println!(
                    "{}  {:<8} {:>6}  {}",
                    video.id,
                    video.source_type.as_str(),
                    duration,
                    video.title
                );
            }
        }
        VideoCommand::Delete { id } => {
            let removed = organizer.delete_video(VideoId::parse(&id)?).await?;
            println!("Deleted video {} and {} clip(s)", id, removed);
        }
    }
    Ok(())
}

async fn folder(organizer: &mut DraftOrganizer, action: FolderCommand) -> Result<()> {
    match action {
        FolderCommand::Create { name } => {
            let folder = organizer.create_folder(&name).await?;
            println!("{}", folder.id);
        }
        FolderCommand::Rename { id, name } => {
            organizer.rename_folder(FolderId::parse(&id)?, &name).await?;
            println!("Renamed folder {}", id);
        }
        FolderCommand::Delete { id } => {
            let detached = organizer.delete_folder(FolderId::parse(&id)?).await?;
            println!("Deleted folder {}; {} clip(s) now unorganized", id, detached);
        }
        FolderCommand::List => {
            let view = organizer.partition();
            for (folder, clips) in &view.by_folder {
                println!("{}  {:>3} clip(s)  {}", folder.id, clips.len(), folder.name);
            }
        }
    }
    Ok(())
}

async fn clip(organizer: &mut DraftOrganizer, settings: &Settings, action: ClipCommand) -> Result<()> {
    let parser = TimeParser::new();
    match action {
        ClipCommand::Create(args) => {
            let range = TimeRange::unchecked(parser.parse_time(&args.start)?, parser.parse_time(&args.end)?);
            let mut draft = ClipDraft::new(args.title, range);
            draft.aspect_ratio = match args.aspect {
                Some(aspect) => AspectRatio::parse(&aspect)?,
                None => settings.default_aspect_ratio,
            };
            draft.subtitle_enabled = args.subtitles;
            draft.subtitle_settings = SubtitleSettings {
                font: SubtitleFont::parse(&args.font)?,
                design: SubtitleDesign::parse(&args.design)?,
                highlights: args.highlights,
            };
            draft.text_overlays = overlays_from_texts(args.overlays);
            draft.folder_id = args.folder.as_deref().map(FolderId::parse).transpose()?;

            let clip = organizer.create_clip(VideoId::parse(&args.video)?, draft).await?;
            println!("{}", clip.id);
        }
        ClipCommand::List(args) => {
            let folder_filter = args.folder.as_deref().map(FolderId::parse).transpose()?;
            for clip in organizer.clips() {
                let wanted = match (folder_filter, args.unorganized) {
                    (Some(folder_id), _) => clip.folder_id == Some(folder_id),
                    (None, true) => clip.folder_id.is_none(),
                    (None, false) => true,
                };
                if wanted {
                    print_clip(clip);
                }
            }
        }
        ClipCommand::Edit(args) => {
            let id = ClipId::parse(&args.id)?;
            let current = organizer
                .clip(id)
                .cloned()
                .ok_or_else(|| anyhow!("Clip {} does not exist", id))?;

            let mut patch = ClipPatch {
                title: args.title,
                aspect_ratio: args.aspect.as_deref().map(AspectRatio::parse).transpose()?,
                subtitle_enabled: args.subtitles,
                ..ClipPatch::default()
            };

            if args.start.is_some() || args.end.is_some() {
                let start = match &args.start {
                    Some(start) => parser.parse_time(start)?,
                    None => current.range.start_time,
                };
                let end = match &args.end {
                    Some(end) => parser.parse_time(end)?,
                    None => current.range.end_time,
                };
                let duration = organizer
                    .video(current.video_id)
                    .map(|video| video.duration)
                    .unwrap_or(0);
                patch = patch.with_range(TimeRange::unchecked(start, RangeRules::clamp_end(end, duration)));
            }

            if args.font.is_some() || args.design.is_some() {
                let mut settings = current.subtitle_settings.clone();
                if let Some(font) = &args.font {
                    settings.font = SubtitleFont::parse(font)?;
                }
                if let Some(design) = &args.design {
                    settings.design = SubtitleDesign::parse(design)?;
                }
                patch = patch.with_subtitle_settings(settings);
            }

            // one write, so a failed edit leaves the clip as it was
            let updated = if patch.is_empty() {
                current
            } else {
                organizer.update_clip(id, patch).await?
            };
            print_clip(&updated);
        }
        ClipCommand::Move { ids, folder } => {
            let ids = parse_clip_ids(&ids)?;
            let folder_id = folder.as_deref().map(FolderId::parse).transpose()?;
            let outcome = organizer.move_to_folder(&ids, folder_id).await?;
            report_batch("Moved", &outcome)?;
        }
        ClipCommand::Delete { ids } => {
            let ids = parse_clip_ids(&ids)?;
            let outcome = organizer.delete_clips(&ids).await?;
            report_batch("Deleted", &outcome)?;
        }
    }
    Ok(())
}

/// Stack overlays top to bottom so they do not overlap by default
fn overlays_from_texts(texts: Vec<String>) -> OverlayCollection {
    let mut overlays = OverlayCollection::new();
    for (index, text) in texts.into_iter().enumerate() {
        let base = OverlayTemplate::default();
        overlays.add(OverlayTemplate {
            text,
            y: base.y + index as f64 * base.font_size as f64 * 1.5,
            ..base
        });
    }
    overlays
}

fn parse_clip_ids(ids: &[String]) -> Result<Vec<ClipId>> {
    ids.iter()
        .map(|id| ClipId::parse(id).map_err(anyhow::Error::from))
        .collect()
}

fn report_batch(verb: &str, outcome: &BatchOutcome) -> Result<()> {
    for id in &outcome.succeeded {
        println!("{} {}", verb, id);
    }
    for (id, reason) in &outcome.failed {
        println!("Failed {}: {}", id, reason);
    }
    if !outcome.is_complete() {
        bail!(
            "{} of {} clip(s) failed",
            outcome.failed.len(),
            outcome.failed.len() + outcome.succeeded.len()
        );
    }
    Ok(())
}

fn print_clip(clip: &Clip) {
    let subtitles = if clip.subtitle_enabled {
        format!(
            "subs:{}/{}",
            clip.subtitle_settings.font.as_str(),
            clip.subtitle_settings.design.as_str()
        )
    } else {
        "subs:off".to_string()
    };
    println!(
        "{}  {}  {:<5} {}  overlays:{}  {}",
        clip.id,
        clip.range,
        clip.aspect_ratio.as_str(),
        subtitles,
        clip.text_overlays.len(),
        clip.title
    );
}

async fn print_config(container: &DefaultAppContainer) -> Result<()> {
    let config = container.config();
    for key in config.get_all_config_keys().await? {
        let value = config.get_config(&key).await?.unwrap_or_default();
        println!("{} = {}", key, value);
    }
    Ok(())
}

fn print_tree(organizer: &DraftOrganizer) {
    let view = organizer.partition();
    for (folder, clips) in &view.by_folder {
        println!("{}/ ({})", folder.name, folder.id);
        for clip in clips {
            println!("  {}  {}  {}", clip.range, clip.id, clip.title);
        }
    }
    println!("Unorganized");
    for clip in &view.unorganized {
        println!("  {}  {}  {}", clip.range, clip.id, clip.title);
    }
}
