//! Integration tests for the `Platform` facade.
//!
//! Wires the real services to the portable adapters: a `DirectoryBundle`
//! laid out in a temp directory, headless dialogs, and a
//! `FixedScreenSource` standing in for the OS screen list.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use easel_cocoa::application::dialogs::DialogService;
use easel_cocoa::application::displays::{DisplayService, ScreenSource};
use easel_cocoa::application::resources::{ResourceBundle, ResourceService};
use easel_cocoa::infrastructure::bundle::DirectoryBundle;
use easel_cocoa::infrastructure::dialogs::HeadlessFileDialogs;
use easel_cocoa::infrastructure::screens::FixedScreenSource;
use easel_cocoa::Platform;
use easel_core::{
    Area, DisplayEvent, DisplayId, DisplayObserver, DisplayRef, Resolution, ResourceError,
    ScreenRecord,
};

#[derive(Default)]
struct EventLog(Mutex<Vec<String>>);

impl EventLog {
    fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl DisplayObserver for EventLog {
    fn display_connected(&self, display: &DisplayRef) {
        self.0.lock().unwrap().push(format!("connected {}", display.id()));
    }
    fn display_disconnected(&self, display: &DisplayRef) {
        self.0.lock().unwrap().push(format!("disconnected {}", display.id()));
    }
    fn display_changed(&self, display: &DisplayRef) {
        self.0.lock().unwrap().push(format!("changed {}", display.id()));
    }
}

fn unused_default_bundle() -> Box<dyn ResourceBundle> {
    Box::new(DirectoryBundle::beside_executable())
}

/// `<tmp>/Sketch.app` with `Contents/Resources/{shaders/blur.frag, assets/}`.
fn sketch_app() -> (PathBuf, PathBuf) {
    let root = std::env::temp_dir().join(format!("easel_platform_{}", uuid::Uuid::new_v4()));
    let resources = root.join("Sketch.app").join("Contents").join("Resources");
    std::fs::create_dir_all(resources.join("shaders")).unwrap();
    std::fs::create_dir_all(resources.join("assets")).unwrap();
    std::fs::write(resources.join("shaders").join("blur.frag"), b"void main() {}").unwrap();
    std::fs::write(resources.join("assets").join("brush.png"), b"\x89PNG").unwrap();
    (root, resources)
}

fn platform_with(bundle_root: &Path, screens: FixedScreenSource) -> Platform {
    let mut resources = ResourceService::new(unused_default_bundle);
    resources.set_bundle(Box::new(DirectoryBundle::open(bundle_root).expect("bundle dir")));
    let dialogs = DialogService::with_home(Box::new(HeadlessFileDialogs::new("tests")), None);
    let displays = DisplayService::new(Box::new(screens));
    Platform::new(resources, dialogs, displays)
}

#[test]
fn test_launch_resolves_resources_and_assets_from_the_bundle() {
    // Arrange
    let (root, resources) = sketch_app();
    let mut platform = platform_with(&root.join("Sketch.app"), FixedScreenSource::single_1080p());

    // Act
    let asset_dir = platform.prepare_launch();
    let shader = platform.resource_path(Path::new("shaders/blur.frag"));
    let data = platform
        .load_resource(Path::new("shaders/blur.frag"))
        .expect("shader")
        .read_to_vec()
        .expect("read");

    // Assert
    assert_eq!(asset_dir, Some(resources.join("assets")));
    assert_eq!(
        platform.resources().asset_path(Path::new("brush.png")),
        Some(resources.join("assets").join("brush.png"))
    );
    assert_eq!(shader, resources.join("shaders").join("blur.frag"));
    assert_eq!(data, b"void main() {}");
    assert_eq!(platform.resource_root(), resources);

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn test_missing_and_empty_resources() {
    let (root, _resources) = sketch_app();
    let platform = platform_with(&root.join("Sketch.app"), FixedScreenSource::single_1080p());

    assert_eq!(platform.resource_path(Path::new("")), PathBuf::new());
    assert!(matches!(
        platform.load_resource(Path::new("shaders/missing.frag")),
        Err(ResourceError::NotFound(_))
    ));

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn test_headless_dialogs_report_no_selection() {
    let (root, _resources) = sketch_app();
    let platform = platform_with(&root, FixedScreenSource::single_1080p());

    assert_eq!(platform.open_file_path(Path::new("~/Documents"), &["png"][..]), None);
    assert_eq!(platform.folder_path(Path::new("")), None);
    assert_eq!(platform.save_file_path(&root.join("out.png"), &[".png"][..]), None);

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn test_hot_plug_events_flow_from_source_to_observer() {
    // Arrange
    let (root, _resources) = sketch_app();
    let screens = FixedScreenSource::dual_1440p();
    let os = screens.clone();
    let mut platform = platform_with(&root, screens);
    let log = Arc::new(EventLog::default());
    platform.set_display_observer(log.clone());
    assert_eq!(platform.displays(false).len(), 2);
    assert!(os.is_watched());

    // Act: unplug the right-hand monitor, plug a projector in, then make it
    // the main display.
    os.emit(DisplayEvent::Removed(DisplayId(2)));
    os.emit(DisplayEvent::Added(ScreenRecord::with_default_metrics(
        DisplayId(3),
        Area::new(2560, 0, 3840, 720),
    )));
    os.emit(DisplayEvent::Moved {
        id: DisplayId(3),
        bounds: Area::new(0, 0, 1280, 720),
        set_main: true,
    });
    let applied = platform.pump_display_events();

    // Assert
    assert_eq!(applied, 3);
    assert_eq!(
        log.entries(),
        vec!["disconnected display#2", "connected display#3", "changed display#3"]
    );
    let ids: Vec<DisplayId> = platform.displays(false).iter().map(|d| d.id()).collect();
    assert_eq!(ids, vec![DisplayId(3), DisplayId(1)]);
    assert_eq!(platform.displays(false)[0].bounds(), Area::new(0, 0, 1280, 720));

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn test_set_resolution_picks_closest_mode() {
    // Arrange
    let (root, _resources) = sketch_app();
    let screens = FixedScreenSource::dual_1440p();
    let os = screens.clone();
    let mut platform = platform_with(&root, screens);
    let second = platform.displays(false)[1].clone();

    // Act
    let applied = platform
        .display_service()
        .set_resolution(&second, Resolution::new(1900, 1000));

    // Assert
    assert_eq!(applied, Some(Resolution::new(1920, 1080)));
    assert_eq!(
        os.applied_modes(),
        vec![(DisplayId(2), Resolution::new(1920, 1080))]
    );

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn test_set_resolution_after_mode_list_changed_applies_nothing() {
    // Arrange: the OS drops 1080p from the second display after the
    // registry captured its modes.
    let (root, _resources) = sketch_app();
    let screens = FixedScreenSource::dual_1440p();
    let os = screens.clone();
    let mut platform = platform_with(&root, screens);
    let second = platform.displays(false)[1].clone();
    let mut records = os.enumerate().expect("records");
    records[1].supported_resolutions.retain(|m| *m != Resolution::new(1920, 1080));
    os.set_records(records);

    // Act
    let applied = platform
        .display_service()
        .set_resolution(&second, Resolution::new(1900, 1000));

    // Assert
    assert_eq!(applied, None);
    assert!(os.applied_modes().is_empty());

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn test_force_refresh_picks_up_new_screen_list() {
    let (root, _resources) = sketch_app();
    let screens = FixedScreenSource::single_1080p();
    let os = screens.clone();
    let mut platform = platform_with(&root, screens);
    assert_eq!(platform.displays(false).len(), 1);

    os.set_records(FixedScreenSource::dual_1440p().enumerate().expect("records"));

    assert_eq!(platform.displays(false).len(), 1);
    assert_eq!(platform.displays(true).len(), 2);

    std::fs::remove_dir_all(&root).ok();
}
