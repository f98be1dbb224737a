//! 宿主演示程序
//!
//! 按配置构造宿主（嵌入式或无头），注册一个演示监听器，驱动若干帧后退出。

use anyhow::{Context, Result};
use app_core::{Application, ApplicationListener, Color, FileKind, shared_listener};
use clap::Parser;
use host::{
    AudioBackend, EmbeddedApplication, HeadlessApplication, HostConfig, LifecycleDriver, SurfaceId,
};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

/// 模拟的帧间隔（约 60 FPS）
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Parser, Debug)]
#[command(name = "host", version, about = "应用宿主演示程序")]
struct Cli {
    /// 配置文件路径
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// 驱动的帧数
    #[arg(long, default_value_t = 3)]
    frames: u32,

    /// 以无头模式运行
    #[arg(long)]
    headless: bool,

    /// 覆盖表面宽度
    #[arg(long)]
    width: Option<u32>,

    /// 覆盖表面高度
    #[arg(long)]
    height: Option<u32>,

    /// 只使用基础渲染接口
    #[arg(long)]
    baseline_only: bool,

    /// 不打开音频设备
    #[arg(long)]
    silent: bool,

    /// 结束时把后备缓冲保存为 PNG（仅嵌入式模式）
    #[arg(long)]
    screenshot: Option<PathBuf>,

    /// 宿主内部日志级别（trace/debug/info/warn/error）
    #[arg(long)]
    log_level: Option<Level>,
}

/// 演示监听器：每帧换一种清屏颜色，并通过宿主日志报告进度
#[derive(Default)]
struct DemoListener {
    frames: u64,
}

impl ApplicationListener for DemoListener {
    fn create(&mut self, app: &dyn Application) {
        app.log("INFO", "started");
        let files = app.files();
        let assets = files.list(FileKind::Internal, "");
        app.log("FILES", &format!("{} internal files", assets.len()));
    }

    fn resize(&mut self, width: u32, height: u32) {
        info!(width, height, "渲染区域尺寸");
    }

    fn render(&mut self, app: &dyn Application) {
        let graphics = app.graphics();
        let t = (graphics.frame_id() % 8) as f32 / 7.0;
        graphics.clear(Color::rgba(t, 0.2, 1.0 - t, 1.0));
        app.audio().update(graphics.delta_time());
        self.frames += 1;
    }

    fn dispose(&mut self) {
        info!(frames = self.frames, "演示监听器释放");
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 配置优先级：命令行 > 配置文件 > 默认值
    let mut config = HostConfig::load(&cli.config);
    if let Some(width) = cli.width {
        config.surface.width = width;
    }
    if let Some(height) = cli.height {
        config.surface.height = height;
    }
    if cli.baseline_only {
        config.prefer_advanced_api = false;
    }
    if cli.silent {
        config.audio.backend = AudioBackend::Silent;
    }

    let level = cli.log_level.unwrap_or_else(|| config.tracing_level());
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    config.validate().context("配置无效")?;

    if cli.headless {
        let app = HeadlessApplication::with_options(host::HostOptions::from_config(&config)?);
        let driver = run(app, cli.frames);
        info!(host_type = %driver.app().host_type(), "演示结束");
        return Ok(());
    }

    let surface = config.build_surface(SurfaceId(1));
    let app = EmbeddedApplication::from_config(&surface, &config)
        .with_context(|| format!("无法在 {} 上初始化宿主", surface.id()))?;
    let driver = run(app, cli.frames);

    if let Some(path) = &cli.screenshot {
        driver
            .app()
            .surface_graphics()
            .save_screenshot(path)
            .with_context(|| format!("无法保存截图: {}", path.display()))?;
        info!(path = ?path, "截图已保存");
    }
    info!(host_type = %driver.app().host_type(), "演示结束");
    Ok(())
}

/// 注册演示监听器并驱动固定帧数
fn run<A: Application>(mut app: A, frames: u32) -> LifecycleDriver<A> {
    app.set_application_listener(shared_listener(DemoListener::default()));

    let mut driver = LifecycleDriver::new(app);
    driver.start();

    let start = Instant::now();
    for i in 0..frames {
        driver.frame(start + FRAME_INTERVAL * i);
    }

    driver.stop();
    driver
}
