//! # 宿主组合集成测试
//!
//! 通过 `Application` 接口验证宿主的初始化、监听器注册、日志与文件句柄行为。
//! 这些测试不依赖真实的显示或音频设备。

use app_core::{
    Application, ApplicationListener, FileKind, HostInitializationError, HostType, MemorySink,
    PlaybackOptions, SharedListener, SubsystemKind,
};
use host::{
    AudioBackend, EmbeddedApplication, FilesSource, HeadlessApplication, HostOptions, HostSurface,
    LifecycleDriver, LifecycleState, SurfaceCapabilities, SurfaceId,
};
use std::cell::RefCell;
use std::fs;
use std::io::Write;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

struct Noop;
impl ApplicationListener for Noop {}

/// 所有有效表面（尺寸 × 能力组合）
fn valid_surfaces() -> Vec<HostSurface> {
    let sizes = [(1, 1), (640, 480), (1920, 1080)];
    let capabilities = [
        SurfaceCapabilities::default(),
        SurfaceCapabilities {
            advanced_api: false,
            ..SurfaceCapabilities::default()
        },
    ];

    let mut surfaces = Vec::new();
    let mut next_id = 0;
    for (width, height) in sizes {
        for caps in capabilities {
            next_id += 1;
            surfaces.push(HostSurface::new(SurfaceId(next_id), width, height).with_capabilities(caps));
        }
    }
    surfaces
}

#[test]
fn test_all_flag_combinations_initialize() {
    for surface in valid_surfaces() {
        for prefer_advanced_api in [false, true] {
            for use_reduced_precision in [false, true] {
                let app =
                    EmbeddedApplication::new(&surface, prefer_advanced_api, use_reduced_precision)
                        .unwrap_or_else(|e| panic!("{} 初始化失败: {e}", surface.id()));

                let (width, height) = surface.size();
                assert_eq!(app.graphics().width(), width);
                assert_eq!(app.graphics().height(), height);
                assert_eq!(app.graphics().uses_reduced_precision(), use_reduced_precision);
                assert_eq!(
                    app.graphics().is_advanced_api_available(),
                    prefer_advanced_api && surface.capabilities().advanced_api
                );
                assert_eq!(app.input().pending_events(), 0);
                assert_eq!(app.audio().active_voices(), 0);
            }
        }
    }
}

#[test]
fn test_host_type_is_stable() {
    let surface = HostSurface::new(SurfaceId(1), 320, 240);
    let mut app = EmbeddedApplication::with_options(
        &surface,
        HostOptions {
            host_type: HostType::Web,
            ..HostOptions::default()
        },
    )
    .unwrap();

    assert_eq!(app.host_type(), HostType::Web);
    app.set_application_listener(Rc::new(RefCell::new(Noop)));
    app.log("INFO", "noise");
    let _ = app.files();
    app.graphics().begin_frame(Instant::now());
    assert_eq!(app.host_type(), HostType::Web);

    let headless = HeadlessApplication::new();
    assert_eq!(headless.host_type(), HostType::Headless);
}

#[test]
fn test_listener_replacement_drops_previous() {
    let surface = HostSurface::new(SurfaceId(1), 320, 240);
    let mut app = EmbeddedApplication::new(&surface, true, false).unwrap();

    let a = Rc::new(RefCell::new(Noop));
    let b: SharedListener = Rc::new(RefCell::new(Noop));

    app.set_application_listener(a.clone());
    assert_eq!(Rc::strong_count(&a), 2);

    app.set_application_listener(b.clone());
    assert_eq!(Rc::strong_count(&a), 1);

    let current = app.application_listener().unwrap();
    assert!(Rc::ptr_eq(&current, &b));
}

#[test]
fn test_log_writes_exact_line() {
    let sink = Arc::new(MemorySink::new());
    let surface = HostSurface::new(SurfaceId(1), 320, 240);
    let app = EmbeddedApplication::with_options(
        &surface,
        HostOptions {
            log_sink: sink.clone(),
            ..HostOptions::default()
        },
    )
    .unwrap();

    app.log("INFO", "started");
    assert_eq!(sink.contents(), "INFO: started\n");

    app.log("", "");
    assert_eq!(sink.contents(), "INFO: started\n: \n");
}

#[test]
fn test_log_from_background_thread() {
    let sink = Arc::new(MemorySink::new());
    let app = HeadlessApplication::with_options(HostOptions {
        log_sink: sink.clone(),
        ..HostOptions::default()
    });

    let background = app.log_sink();
    std::thread::spawn(move || background.write_line("BG: done"))
        .join()
        .unwrap();
    app.log("INFO", "main");

    assert_eq!(sink.lines(), vec!["BG: done", "INFO: main"]);
}

#[test]
fn test_files_handles_are_independent() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("data.txt"), b"hello").unwrap();

    let app = HeadlessApplication::with_options(HostOptions {
        files: FilesSource::Directory {
            internal_root: dir.path().to_path_buf(),
            external_root: dir.path().to_path_buf(),
        },
        ..HostOptions::default()
    });

    let first = app.files();
    let second = app.files();
    assert_eq!(
        first.resolve(FileKind::Internal, "data.txt"),
        second.resolve(FileKind::Internal, "data.txt")
    );
    assert_eq!(first.read(FileKind::Internal, "data.txt").unwrap(), b"hello");
    drop(first);
    assert_eq!(second.read(FileKind::Internal, "data.txt").unwrap(), b"hello");
}

fn write_archive(path: &std::path::Path, entries: &[(&str, &[u8])]) {
    let file = fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored);
    for (name, data) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(data).unwrap();
    }
    zip.finish().unwrap();
}

#[test]
fn test_archive_handles_do_not_share_index() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("game.zip");
    write_archive(&archive, &[("a.txt", b"a")]);

    let app = HeadlessApplication::with_options(HostOptions {
        files: FilesSource::Archive {
            archive: archive.clone(),
            external_root: dir.path().to_path_buf(),
        },
        ..HostOptions::default()
    });

    let first = app.files();
    assert_eq!(first.list(FileKind::Internal, ""), vec!["a.txt"]);

    write_archive(&archive, &[("a.txt", b"a"), ("b.txt", b"b")]);
    let second = app.files();
    assert_eq!(second.list(FileKind::Internal, ""), vec!["a.txt", "b.txt"]);
    // 第一个句柄仍使用自己的索引
    assert_eq!(first.list(FileKind::Internal, ""), vec!["a.txt"]);
}

#[test]
fn test_oversized_surface_fails() {
    // 后备缓冲字节数溢出或超过上限：报告图形子系统，而不是在分配时崩溃
    for (id, (width, height)) in [(u32::MAX, u32::MAX), (100_000, 100_000), (16_385, 16_384)]
        .into_iter()
        .enumerate()
    {
        let surface = HostSurface::new(SurfaceId(100 + id as u64), width, height);
        let err = EmbeddedApplication::new(&surface, true, false).err().unwrap();
        assert!(
            matches!(
                err,
                HostInitializationError::SurfaceUnusable {
                    subsystem: SubsystemKind::Graphics,
                    ..
                }
            ),
            "{width}x{height}: {err}"
        );
    }
}

#[cfg(not(feature = "playback"))]
#[test]
fn test_unavailable_audio_device_fails_last() {
    // 图形与输入都可用，音频设备打不开
    let surface = HostSurface::new(SurfaceId(7), 320, 240);
    let options = HostOptions {
        audio: AudioBackend::Device,
        ..HostOptions::default()
    };
    let err = EmbeddedApplication::with_options(&surface, options).err().unwrap();
    assert_eq!(err.subsystem(), SubsystemKind::Audio);
    assert!(matches!(
        err,
        HostInitializationError::DeviceUnavailable {
            subsystem: SubsystemKind::Audio,
            ..
        }
    ));

    let options = HostOptions {
        audio: AudioBackend::Silent,
        ..HostOptions::default()
    };
    assert!(EmbeddedApplication::with_options(&surface, options).is_ok());
}

#[test]
fn test_invalid_surfaces_fail() {
    let mut destroyed = HostSurface::new(SurfaceId(1), 320, 240);
    destroyed.destroy();
    let err = EmbeddedApplication::new(&destroyed, true, false).err().unwrap();
    assert!(matches!(
        err,
        HostInitializationError::SurfaceUnusable {
            subsystem: SubsystemKind::Graphics,
            ..
        }
    ));

    let zero = HostSurface::new(SurfaceId(2), 0, 240);
    let err = EmbeddedApplication::new(&zero, false, false).err().unwrap();
    assert_eq!(err.subsystem(), SubsystemKind::Graphics);

    let no_api = HostSurface::new(SurfaceId(3), 320, 240).with_capabilities(SurfaceCapabilities {
        baseline_api: false,
        advanced_api: false,
        input_capture: true,
    });
    let err = EmbeddedApplication::new(&no_api, true, false).err().unwrap();
    assert!(matches!(
        err,
        HostInitializationError::CapabilityNegotiation {
            subsystem: SubsystemKind::Graphics,
            ..
        }
    ));

    // 只支持高级接口但未允许使用
    let advanced_only =
        HostSurface::new(SurfaceId(4), 320, 240).with_capabilities(SurfaceCapabilities {
            baseline_api: false,
            ..SurfaceCapabilities::default()
        });
    assert!(EmbeddedApplication::new(&advanced_only, false, false).is_err());
    assert!(EmbeddedApplication::new(&advanced_only, true, false).is_ok());

    let no_input = HostSurface::new(SurfaceId(5), 320, 240).with_capabilities(SurfaceCapabilities {
        input_capture: false,
        ..SurfaceCapabilities::default()
    });
    let err = EmbeddedApplication::new(&no_input, true, false).err().unwrap();
    assert!(matches!(
        err,
        HostInitializationError::SurfaceUnusable {
            subsystem: SubsystemKind::Input,
            ..
        }
    ));
}

/// 通过监听器访问宿主子系统的监听器
#[derive(Default)]
struct FrameCounter {
    rendered: Vec<u64>,
    sizes: Vec<(u32, u32)>,
}

impl ApplicationListener for FrameCounter {
    fn create(&mut self, app: &dyn Application) {
        app.log("INFO", "started");
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.sizes.push((width, height));
    }

    fn render(&mut self, app: &dyn Application) {
        self.rendered.push(app.graphics().frame_id());
    }
}

#[test]
fn test_lifecycle_driver_with_embedded_host() {
    let sink = Arc::new(MemorySink::new());
    let surface = HostSurface::new(SurfaceId(1), 320, 240);
    let mut app = EmbeddedApplication::with_options(
        &surface,
        HostOptions {
            log_sink: sink.clone(),
            ..HostOptions::default()
        },
    )
    .unwrap();

    let counter = Rc::new(RefCell::new(FrameCounter::default()));
    app.set_application_listener(counter.clone());

    let mut driver = LifecycleDriver::new(app);
    driver.start();

    let start = Instant::now();
    for i in 0..3 {
        driver.frame(start + Duration::from_millis(16) * i);
    }

    driver.app().surface_graphics().resize(640, 480);
    driver.resize(640, 480);
    driver.pause();
    assert!(driver.app().mixer_audio().is_paused());
    driver.stop();

    assert_eq!(driver.state(), LifecycleState::Stopped);
    assert_eq!(counter.borrow().rendered, vec![1, 2, 3]);
    assert_eq!(counter.borrow().sizes, vec![(320, 240), (640, 480)]);
    assert_eq!(sink.contents(), "INFO: started\n");
    assert_eq!(driver.app().graphics().width(), 640);
}

#[test]
fn test_audio_through_application() {
    let app = HeadlessApplication::new();
    // 非法音频数据
    assert!(app.audio().new_sound(b"not audio").is_err());
    assert!(app.audio().play(app_core::SoundId(99), PlaybackOptions::default()).is_err());
}
