//! SimBridge - 物理仿真与场景图同步桥
//!
//! 命令行入口：加载配置与场景描述，执行一次性几何导出，从导出结果
//! 构建物理模型与绑定表，然后进入逐帧的步进 + 位姿同步循环。
//!
//! # 使用方法
//!
//! ```bash
//! # 使用默认配置（config.toml / scene.toml）
//! cargo run
//!
//! # 覆盖输出目录与帧数
//! cargo run -- --output /tmp/export --frames 100
//! ```
//!
//! # 初始化流程
//!
//! 1. 加载配置文件（config.toml）
//! 2. 应用命令行参数覆盖
//! 3. 验证配置
//! 4. 初始化日志系统
//! 5. 加载场景描述并构建场景图
//! 6. 镜像层级 + 导出几何 → 场景描述文档
//! 7. 从描述构建物理世界与绑定表
//! 8. 逐帧运行：引擎步进 + 位姿同步

use anyhow::Context;
use tracing::info;

use sim_bridge::bridge::{
    BindingTable, GeometryExporter, PoseSynchronizer, SceneDescriptor, SceneDescriptorBuilder,
    SimulationDriver,
};
use sim_bridge::core::math::Vector3;
use sim_bridge::core::{log, Config};
use sim_bridge::physics::RigidBodyWorld;
use sim_bridge::scene::SceneConfig;

fn main() -> anyhow::Result<()> {
    // 1. 加载配置（在初始化日志之前）
    let mut config = Config::from_file_or_default("config.toml");

    // 2. 应用命令行参数
    config.apply_args(std::env::args());

    // 3. 验证配置
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    // 4. 初始化日志系统（使用配置中的设置）
    let log_file = if config.logging.file_output {
        Some(config.logging.log_file.as_str())
    } else {
        None
    };
    log::init_logger(config.logging.level, config.logging.file_output, log_file);
    info!("SimBridge starting...");
    info!(version = env!("CARGO_PKG_VERSION"), "Application initialized");

    info!(
        output_dir = %config.export.output_dir,
        scene_file = %config.export.scene_file,
        timestep = config.simulation.timestep,
        frames = config.simulation.frames,
        "Bridge configuration"
    );

    // 5. 加载场景描述并构建场景图
    let scene = SceneConfig::from_file_or_default(&config.export.scene_file);
    let mut graph = scene.build_stage().context("Failed to build stage")?;

    // 6. 一次性导出：层级镜像 + 几何文件 + 资产/刚体条目
    let mut descriptor = SceneDescriptor::new(&config.export.model_name);
    descriptor.hierarchy = Some(SceneDescriptorBuilder::mirror(&graph, graph.root()));

    let mut exporter = GeometryExporter::new(&config.export.output_dir);
    let report = exporter
        .export(&graph, graph.root(), &mut descriptor)
        .context("Geometry export failed")?;

    let descriptor_path = std::path::Path::new(&config.export.output_dir)
        .join(format!("{}.xml", config.export.model_name));
    descriptor
        .write_to(&descriptor_path)
        .context("Failed to write scene descriptor")?;

    info!(
        exported = report.exported(),
        skipped_faces = report.skipped_faces,
        failed_meshes = report.failed_meshes,
        descriptor = %descriptor_path.display(),
        "Load phase complete"
    );

    // 7. 从描述构建物理世界与按约定的绑定表
    let gravity = Vector3::new(
        config.simulation.gravity[0],
        config.simulation.gravity[1],
        config.simulation.gravity[2],
    );
    let engine = RigidBodyWorld::from_descriptor(&descriptor, gravity);
    let bindings = BindingTable::from_assets(&report.assets)
        .context("Failed to build binding table")?;
    info!(bindings = bindings.len(), "Binding table built");

    // 8. 逐帧运行
    let mut driver = SimulationDriver::new(
        engine,
        PoseSynchronizer::new(bindings),
        config.simulation.timestep,
    );
    let samples = driver.run(&mut graph, config.simulation.frames);

    info!(
        frames = driver.frame(),
        samples,
        final_time = driver.time(),
        "SimBridge finished"
    );

    Ok(())
}
