use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Fresh working directory with an isolated store
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("clipdeck").unwrap();
        cmd.current_dir(self.dir.path())
            .env_remove("CLIPDECK_CONFIG")
            .env_remove("CLIPDECK_STORE_PATH")
            .env_remove("CLIPDECK_LOG_LEVEL")
            .env_remove("CLIPDECK_LOG_FORMAT")
            .env_remove("CLIPDECK_DEFAULT_ASPECT_RATIO")
            .env_remove("RUST_LOG")
            .arg("--store")
            .arg(self.dir.path().join("store.json"));
        cmd
    }

    /// Run and return the single id printed on stdout
    fn run_for_id(&self, args: &[&str]) -> String {
        let output = self.cmd().args(args).output().unwrap();
        assert!(output.status.success(), "command {:?} failed", args);
        String::from_utf8(output.stdout).unwrap().trim().to_string()
    }
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("clipdeck").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("ClipDeck"))
        .stdout(predicate::str::contains("folder"))
        .stdout(predicate::str::contains("clip"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("clipdeck").unwrap();
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains("clipdeck"));
}

#[test]
fn test_empty_store_tree() {
    let ws = Workspace::new();
    ws.cmd()
        .arg("tree")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unorganized"));
}

#[test]
fn test_clip_lifecycle_through_folders() {
    let ws = Workspace::new();
    let video = ws.run_for_id(&["video", "add", "--title", "Episode 12", "--url", "uploads/ep12.mp4", "--duration", "120"]);
    let folder = ws.run_for_id(&["folder", "create", "Intro Cuts"]);
    let clip = ws.run_for_id(&[
        "clip", "create", "--video", video.as_str(), "--title", "Cold open", "--start", "0:10", "--end", "40",
    ]);

    ws.cmd()
        .args(["clip", "move", clip.as_str(), "--folder", folder.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Moved {}", clip)));

    ws.cmd()
        .arg("tree")
        .assert()
        .success()
        .stdout(predicate::str::contains("Intro Cuts/"))
        .stdout(predicate::str::contains("0:10 - 0:40"))
        .stdout(predicate::str::contains("Cold open"));

    ws.cmd()
        .args(["folder", "delete", folder.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 clip(s) now unorganized"));

    ws.cmd()
        .args(["clip", "list", "--unorganized"])
        .assert()
        .success()
        .stdout(predicate::str::contains(clip.as_str()));
}

#[test]
fn test_clip_outside_video_is_rejected() {
    let ws = Workspace::new();
    let video = ws.run_for_id(&["video", "add", "--title", "Short", "--url", "uploads/short.mp4", "--duration", "30"]);

    ws.cmd()
        .args(["clip", "create", "--video", video.as_str(), "--title", "Too long", "--start", "10", "--end", "45"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside 0..30"));

    ws.cmd()
        .args(["clip", "create", "--video", video.as_str(), "--title", "Backwards", "--start", "20", "--end", "5"])
        .assert()
        .failure();
}

#[test]
fn test_move_to_missing_folder_fails() {
    let ws = Workspace::new();
    let video = ws.run_for_id(&["video", "add", "--title", "Talk", "--url", "uploads/talk.mp4"]);
    let clip = ws.run_for_id(&["clip", "create", "--video", video.as_str(), "--title", "Q&A", "--start", "0", "--end", "30"]);

    ws.cmd()
        .args(["clip", "move", clip.as_str(), "--folder", "0190a1b2-0000-7000-8000-000000000000"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(format!("Failed {}", clip)));

    ws.cmd()
        .args(["clip", "list", "--unorganized"])
        .assert()
        .success()
        .stdout(predicate::str::contains(clip.as_str()));
}

#[test]
fn test_delete_video_removes_its_clips() {
    let ws = Workspace::new();
    let video = ws.run_for_id(&["video", "add", "--title", "Gone", "--url", "uploads/gone.mp4", "--duration", "60"]);
    ws.run_for_id(&["clip", "create", "--video", video.as_str(), "--title", "a", "--start", "0", "--end", "10"]);
    ws.run_for_id(&["clip", "create", "--video", video.as_str(), "--title", "b", "--start", "10", "--end", "20"]);

    ws.cmd()
        .args(["video", "delete", video.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 clip(s)"));

    ws.cmd()
        .args(["clip", "list"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_invalid_aspect_ratio_is_rejected() {
    let ws = Workspace::new();
    let video = ws.run_for_id(&["video", "add", "--title", "V", "--url", "uploads/v.mp4"]);

    ws.cmd()
        .args(["clip", "create", "--video", video.as_str(), "--title", "x", "--start", "0", "--end", "5", "--aspect", "3:2"])
        .assert()
        .failure();
}

#[test]
fn test_config_file_sets_default_aspect_ratio() {
    let ws = Workspace::new();
    std::fs::write(
        ws.dir.path().join("clipdeck.toml"),
        "[clipdeck]\ndefault_aspect_ratio = \"1:1\"\n",
    )
    .unwrap();
    let video = ws.run_for_id(&["video", "add", "--title", "V", "--url", "uploads/v.mp4"]);
    ws.run_for_id(&["clip", "create", "--video", video.as_str(), "--title", "Square", "--start", "0", "--end", "5"]);

    ws.cmd()
        .args(["clip", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1:1"));
}

#[test]
fn test_config_command_shows_cli_override() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["--log-level", "warn", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("log_level = warn"))
        .stdout(predicate::str::contains("default_aspect_ratio = 9:16"));
}

#[test]
fn test_clip_edit_clamps_range_and_renames_together() {
    let ws = Workspace::new();
    let video = ws.run_for_id(&["video", "add", "--title", "Panel", "--url", "uploads/panel.mp4", "--duration", "120"]);
    let clip = ws.run_for_id(&["clip", "create", "--video", video.as_str(), "--title", "Opening", "--start", "10", "--end", "40"]);

    ws.cmd()
        .args(["clip", "edit", clip.as_str(), "--end", "500", "--title", "Renamed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0:10 - 2:00"))
        .stdout(predicate::str::contains("Renamed"));

    ws.cmd()
        .args(["clip", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0:10 - 2:00"))
        .stdout(predicate::str::contains("Renamed"));
}

#[test]
fn test_clip_edit_rejected_range_keeps_title() {
    let ws = Workspace::new();
    let video = ws.run_for_id(&["video", "add", "--title", "Panel", "--url", "uploads/panel.mp4", "--duration", "120"]);
    let clip = ws.run_for_id(&["clip", "create", "--video", video.as_str(), "--title", "Opening", "--start", "10", "--end", "40"]);

    ws.cmd()
        .args(["clip", "edit", clip.as_str(), "--start", "50", "--end", "20", "--title", "Renamed"])
        .assert()
        .failure();

    ws.cmd()
        .args(["clip", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Opening"))
        .stdout(predicate::str::contains("Renamed").not());
}

#[test]
fn test_clip_edit_changes_subtitle_style() {
    let ws = Workspace::new();
    let video = ws.run_for_id(&["video", "add", "--title", "Vlog", "--url", "uploads/vlog.mp4", "--duration", "90"]);
    let clip = ws.run_for_id(&["clip", "create", "--video", video.as_str(), "--title", "Hook", "--start", "0", "--end", "15"]);

    ws.cmd()
        .args(["clip", "edit", clip.as_str(), "--subtitles", "true", "--font", "Roboto", "--design", "bold"])
        .assert()
        .success();

    ws.cmd()
        .args(["clip", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("subs:Roboto/bold"));

    ws.cmd()
        .args(["clip", "edit", clip.as_str(), "--font", "Comic Sans"])
        .assert()
        .failure();
}
